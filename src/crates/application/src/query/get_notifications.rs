use crate::query::dao::NotificationDao;
use crate::query::QueryError;
use model::notification::{excerpt, NotificationPage, UnreadCount};
use model::pagination::PageRequest;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Clone)]
pub struct GetNotifications {
    dao: Arc<dyn NotificationDao + Send + Sync>,
}

impl GetNotifications {
    pub fn new(dao: Arc<dyn NotificationDao + Send + Sync>) -> Self {
        Self { dao }
    }

    pub async fn handle(
        &self,
        receiver: &str,
        page: PageRequest,
        unread_only: bool,
    ) -> Result<NotificationPage, QueryError> {
        let total = self.dao.count(receiver, unread_only).await?;
        let mut notifications = self
            .dao
            .list(receiver, unread_only, page.offset(), page.limit())
            .await?;
        for n in notifications.iter_mut() {
            n.comment_excerpt = excerpt(&n.comment_excerpt);
        }
        Ok(NotificationPage {
            notifications,
            pagination: page.pagination(total),
        })
    }

    pub async fn unread_count(&self, receiver: &str) -> Result<UnreadCount, QueryError> {
        let unread_count = self.dao.count(receiver, true).await?;
        Ok(UnreadCount { unread_count })
    }
}
