use domain::catalog::Album;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "album")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name_cn: String,
    pub name_en: String,
    pub release_date: String,
    pub cover_url: String,
    #[sea_orm(column_type = "Text")]
    pub album_detail: String,
    #[sea_orm(column_type = "Text")]
    pub creation_background: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub awards: Json,
    pub language: String,
    pub record_label: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Song,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Song => Entity::has_many(super::song::Entity)
                .from(Column::Id)
                .to(super::song::Column::AlbumId)
                .into(),
        }
    }
}

impl Related<super::song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Song.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Album> for ActiveModel {
    fn from(album: &Album) -> Self {
        Self {
            id: Set(album.id.clone()),
            name_cn: Set(album.name_cn.clone()),
            name_en: Set(album.name_en.clone()),
            release_date: Set(album.release_date.clone()),
            cover_url: Set(album.cover_url.clone()),
            album_detail: Set(album.album_detail.clone()),
            creation_background: Set(album.creation_background.clone()),
            awards: Set(Json::from(album.awards.clone())),
            language: Set(album.language.clone()),
            record_label: Set(album.record_label.clone()),
        }
    }
}

impl From<Model> for model::catalog::Album {
    fn from(m: Model) -> Self {
        model::catalog::Album {
            id: m.id,
            name_cn: m.name_cn,
            name_en: m.name_en,
            release_date: m.release_date,
            cover_url: m.cover_url,
            album_detail: m.album_detail,
            creation_background: m.creation_background,
            awards: serde_json::from_value(m.awards).unwrap_or_default(),
            language: m.language,
            record_label: m.record_label,
        }
    }
}
