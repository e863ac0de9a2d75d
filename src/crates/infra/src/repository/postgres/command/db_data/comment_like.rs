use domain::comment::CommentLike;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comment_like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    #[sea_orm(column_type = "BigInteger")]
    pub comment_id: i64,
    pub username: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Comment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Comment => Entity::belongs_to(super::comment::Entity)
                .from(Column::CommentId)
                .to(super::comment::Column::Id)
                .into(),
        }
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CommentLike> for ActiveModel {
    fn from(like: &CommentLike) -> Self {
        Self {
            id: Set(like.id.as_i64()),
            comment_id: Set(like.comment_id.as_i64()),
            username: Set(like.username.clone()),
            created_at: Set(like.created_at),
        }
    }
}
