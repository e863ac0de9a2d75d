use std::sync::Arc;

use crate::error::AppError;
use domain::notification::{NotificationError, NotificationRepository};
use domain::value::NotificationId;
use log::info;

pub struct NotificationAppService {
    notification_repo: Arc<dyn NotificationRepository>,
}

impl NotificationAppService {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// 标记单条通知为已读；不属于当前用户的通知视为不存在
    pub async fn mark_read(&self, notification_id: i64, receiver: &str) -> Result<(), AppError> {
        let mut notification = self
            .notification_repo
            .find_by_id(NotificationId::from(notification_id))
            .await?
            .filter(|n| n.receiver == receiver)
            .ok_or(NotificationError::NotFound(notification_id))?;

        if !notification.read {
            notification.mark_read();
            self.notification_repo.save(&notification).await?;
        }
        Ok(())
    }

    pub async fn mark_all_read(&self, receiver: &str) -> Result<u64, AppError> {
        let updated = self.notification_repo.mark_all_read(receiver).await?;
        info!("{} notifications marked read for {}", updated, receiver);
        Ok(updated)
    }
}
