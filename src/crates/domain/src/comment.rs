use super::value::{CommentId, CommentLikeId, ResourceRef};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

pub const MAX_CONTENT_CHARS: usize = 500;

#[derive(Error, Debug)]
pub enum CommentError {
    #[error("comment content cannot be empty")]
    EmptyContent,
    #[error("comment content cannot exceed 500 characters")]
    ContentTooLong,
    #[error("comment not found: {0}")]
    NotFound(i64),
    #[error("only the author can delete this comment")]
    NotAuthor,
    #[error("already liked")]
    AlreadyLiked,
    #[error("not liked yet")]
    NotLiked,
    #[error("{0}")]
    DbErr(String),
}

/// 清理并校验评论内容：去除首尾空白，长度 1..=500 个字符
pub fn normalize_content(raw: &str) -> Result<String, CommentError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(CommentError::EmptyContent);
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(CommentError::ContentTooLong);
    }
    Ok(content.to_string())
}

/// 回复目标：被回复的那条评论及其作者
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyTarget {
    pub comment_id: CommentId,
    pub username: String,
}

/// 评论聚合
///
/// 评论树只有一层：顶层评论的 parent_id 为空，
/// 所有回复（包括回复的回复）都挂在顶层评论下，
/// 通过 reply_to 记录实际回复的对象。
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub resource: ResourceRef,
    pub username: String,
    pub content: String,
    pub parent_id: Option<CommentId>,
    pub reply_to: Option<ReplyTarget>,
    pub like_count: i64,
    pub created_at: NaiveDateTime,
}

impl Comment {
    pub fn new(
        id: CommentId,
        resource: ResourceRef,
        username: &str,
        content: &str,
    ) -> Result<Self, CommentError> {
        Ok(Self {
            id,
            resource,
            username: username.to_string(),
            content: normalize_content(content)?,
            parent_id: None,
            reply_to: None,
            like_count: 0,
            created_at: Utc::now().naive_utc(),
        })
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// 所在评论树的顶层评论
    pub fn root_id(&self) -> CommentId {
        self.parent_id.unwrap_or(self.id)
    }

    /// 以当前评论为目标创建回复
    pub fn reply(&self, id: CommentId, username: &str, content: &str) -> Result<Comment, CommentError> {
        let mut reply = Comment::new(id, self.resource.clone(), username, content)?;
        reply.parent_id = Some(self.root_id());
        reply.reply_to = Some(ReplyTarget {
            comment_id: self.id,
            username: self.username.clone(),
        });
        Ok(reply)
    }

    pub fn ensure_author(&self, username: &str) -> Result<(), CommentError> {
        if self.username != username {
            return Err(CommentError::NotAuthor);
        }
        Ok(())
    }
}

/// 点赞记录，(comment_id, username) 唯一
#[derive(Debug, Clone)]
pub struct CommentLike {
    pub id: CommentLikeId,
    pub comment_id: CommentId,
    pub username: String,
    pub created_at: NaiveDateTime,
}

impl CommentLike {
    pub fn new(id: CommentLikeId, comment_id: CommentId, username: &str) -> Self {
        Self {
            id,
            comment_id,
            username: username.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentError>;

    async fn insert(&self, comment: &Comment) -> Result<(), CommentError>;

    /// 删除评论；顶层评论连同其全部回复一起删除。
    /// 被删除评论的点赞与通知在同一事务中清理。返回删除的评论数。
    async fn delete_cascade(&self, comment: &Comment) -> Result<u64, CommentError>;

    /// 写入点赞并递增 like_count，返回最新计数；重复点赞返回 AlreadyLiked
    async fn add_like(&self, like: &CommentLike) -> Result<i64, CommentError>;

    /// 删除点赞并递减 like_count，返回最新计数；未点赞返回 NotLiked
    async fn remove_like(&self, comment_id: CommentId, username: &str) -> Result<i64, CommentError>;
}
