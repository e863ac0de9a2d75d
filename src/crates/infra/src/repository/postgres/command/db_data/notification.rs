use domain::notification::{Notification, NotificationError, NotificationKind};
use domain::value::{CommentId, NotificationId};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub receiver: String,
    pub sender: String,
    #[sea_orm(column_type = "BigInteger")]
    pub comment_id: i64,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Notification> for ActiveModel {
    fn from(n: &Notification) -> Self {
        Self {
            id: Set(n.id.as_i64()),
            receiver: Set(n.receiver.clone()),
            sender: Set(n.sender.clone()),
            comment_id: Set(n.comment_id.as_i64()),
            kind: Set(n.kind.to_string()),
            read: Set(n.read),
            created_at: Set(n.created_at),
        }
    }
}

impl TryFrom<Model> for Notification {
    type Error = NotificationError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind =
            NotificationKind::try_from(model.kind.as_str()).map_err(NotificationError::DbErr)?;
        Ok(Notification {
            id: NotificationId::from(model.id),
            receiver: model.receiver,
            sender: model.sender,
            comment_id: CommentId::from(model.comment_id),
            kind,
            read: model.read,
            created_at: model.created_at,
        })
    }
}
