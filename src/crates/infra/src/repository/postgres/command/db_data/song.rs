use domain::catalog::Song;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "song")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub album_id: String,
    pub track_number: i32,
    pub name_cn: String,
    pub name_en: Option<String>,
    pub lyricist: String,
    pub composer: String,
    pub arranger: Option<String>,
    pub duration: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Album,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Album => Entity::belongs_to(super::album::Entity)
                .from(Column::AlbumId)
                .to(super::album::Column::Id)
                .into(),
        }
    }
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Song> for ActiveModel {
    fn from(song: &Song) -> Self {
        Self {
            id: Set(song.id.clone()),
            album_id: Set(song.album_id.clone()),
            track_number: Set(song.track_number),
            name_cn: Set(song.name_cn.clone()),
            name_en: Set(song.name_en.clone()),
            lyricist: Set(song.lyricist.clone()),
            composer: Set(song.composer.clone()),
            arranger: Set(song.arranger.clone()),
            duration: Set(song.duration.clone()),
        }
    }
}

impl From<Model> for model::catalog::Song {
    fn from(m: Model) -> Self {
        model::catalog::Song {
            id: m.id,
            album_id: m.album_id,
            track_number: m.track_number,
            name_cn: m.name_cn,
            name_en: m.name_en,
            lyricist: m.lyricist,
            composer: m.composer,
            arranger: m.arranger,
            duration: m.duration,
        }
    }
}
