use super::db_data::notification::{self, ActiveModel, Entity};
use async_trait::async_trait;
use domain::notification::{
    Notification, NotificationError, NotificationKind, NotificationRepository,
};
use domain::value::{CommentId, NotificationId};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, NotificationError> {
        let result = Entity::find_by_id(id.as_i64())
            .one(self.db.as_ref())
            .await
            .map_err(|e| NotificationError::DbErr(e.to_string()))?;
        result.map(Notification::try_from).transpose()
    }

    async fn insert(&self, n: &Notification) -> Result<(), NotificationError> {
        let active_model: ActiveModel = n.into();
        Entity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| NotificationError::DbErr(e.to_string()))?;
        Ok(())
    }

    async fn save(&self, n: &Notification) -> Result<(), NotificationError> {
        let active_model: ActiveModel = n.into();
        active_model
            .update(self.db.as_ref())
            .await
            .map_err(|e| NotificationError::DbErr(e.to_string()))?;
        Ok(())
    }

    async fn mark_all_read(&self, receiver: &str) -> Result<u64, NotificationError> {
        let result = Entity::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::Receiver.eq(receiver))
            .filter(notification::Column::Read.eq(false))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| NotificationError::DbErr(e.to_string()))?;
        Ok(result.rows_affected)
    }

    async fn withdraw(
        &self,
        kind: NotificationKind,
        comment_id: CommentId,
        sender: &str,
    ) -> Result<u64, NotificationError> {
        let result = Entity::delete_many()
            .filter(notification::Column::Kind.eq(kind.as_str()))
            .filter(notification::Column::CommentId.eq(comment_id.as_i64()))
            .filter(notification::Column::Sender.eq(sender))
            .filter(notification::Column::Read.eq(false))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| NotificationError::DbErr(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
