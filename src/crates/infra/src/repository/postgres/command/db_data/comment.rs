use domain::comment::{Comment, CommentError, ReplyTarget};
use domain::value::{CommentId, ResourceKind, ResourceRef};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub resource_type: String,
    pub resource_id: String,
    pub username: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub parent_id: Option<i64>,
    pub reply_to_comment_id: Option<i64>,
    pub reply_to_username: Option<String>,
    #[sea_orm(column_type = "BigInteger")]
    pub like_count: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CommentLike,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::CommentLike => Entity::has_many(super::comment_like::Entity)
                .from(Column::Id)
                .to(super::comment_like::Column::CommentId)
                .into(),
        }
    }
}

impl Related<super::comment_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommentLike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Comment> for ActiveModel {
    fn from(comment: &Comment) -> Self {
        Self {
            id: Set(comment.id.as_i64()),
            resource_type: Set(comment.resource.kind.to_string()),
            resource_id: Set(comment.resource.id.clone()),
            username: Set(comment.username.clone()),
            content: Set(comment.content.clone()),
            parent_id: Set(comment.parent_id.map(|id| id.as_i64())),
            reply_to_comment_id: Set(comment.reply_to.as_ref().map(|t| t.comment_id.as_i64())),
            reply_to_username: Set(comment.reply_to.as_ref().map(|t| t.username.clone())),
            like_count: Set(comment.like_count),
            created_at: Set(comment.created_at),
        }
    }
}

impl TryFrom<Model> for Comment {
    type Error = CommentError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = ResourceKind::try_from(model.resource_type.as_str())
            .map_err(CommentError::DbErr)?;
        let reply_to = match (model.reply_to_comment_id, model.reply_to_username) {
            (Some(comment_id), Some(username)) => Some(ReplyTarget {
                comment_id: CommentId::from(comment_id),
                username,
            }),
            _ => None,
        };
        Ok(Comment {
            id: CommentId::from(model.id),
            resource: ResourceRef::new(kind, &model.resource_id),
            username: model.username,
            content: model.content,
            parent_id: model.parent_id.map(CommentId::from),
            reply_to,
            like_count: model.like_count,
            created_at: model.created_at,
        })
    }
}
