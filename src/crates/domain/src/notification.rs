use super::value::{CommentId, NotificationId};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("notification not found: {0}")]
    NotFound(i64),
    #[error("{0}")]
    DbErr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Reply,
    Like,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Reply => "reply",
            NotificationKind::Like => "like",
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = String;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "reply" => Ok(NotificationKind::Reply),
            "like" => Ok(NotificationKind::Like),
            _ => Err(format!("invalid value:{}", value)),
        }
    }
}

/// 通知：sender 对 receiver 的评论进行了回复或点赞
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub receiver: String,
    pub sender: String,
    pub comment_id: CommentId,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: NaiveDateTime,
}

impl Notification {
    /// 自己回复或点赞自己的评论不产生通知
    pub fn between(
        id: NotificationId,
        receiver: &str,
        sender: &str,
        comment_id: CommentId,
        kind: NotificationKind,
    ) -> Option<Self> {
        if receiver == sender {
            return None;
        }
        Some(Self {
            id,
            receiver: receiver.to_string(),
            sender: sender.to_string(),
            comment_id,
            kind,
            read: false,
            created_at: Utc::now().naive_utc(),
        })
    }

    pub fn mark_read(&mut self) -> &mut Self {
        self.read = true;
        self
    }
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: NotificationId) -> Result<Option<Notification>, NotificationError>;

    async fn insert(&self, notification: &Notification) -> Result<(), NotificationError>;

    async fn save(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// 将接收者的全部未读通知标记为已读，返回更新条数
    async fn mark_all_read(&self, receiver: &str) -> Result<u64, NotificationError>;

    /// 撤回 sender 针对某条评论发出的、尚未读的某类通知
    async fn withdraw(
        &self,
        kind: NotificationKind,
        comment_id: CommentId,
        sender: &str,
    ) -> Result<u64, NotificationError>;
}
