use std::sync::Arc;

use super::shared::IdGenerator;
use crate::error::AppError;
use domain::catalog::{CatalogError, CatalogRepository};
use domain::comment::{Comment, CommentError, CommentLike, CommentRepository};
use domain::notification::{Notification, NotificationKind, NotificationRepository};
use domain::value::{CommentId, CommentLikeId, NotificationId, ResourceRef};
use log::{debug, info};

/// 发表顶层评论命令
#[derive(Debug)]
pub struct PostCommentCmd {
    pub resource: ResourceRef,
    pub username: String,
    pub content: String,
}

/// 回复评论命令
#[derive(Debug)]
pub struct ReplyCommentCmd {
    pub comment_id: i64,
    pub username: String,
    pub content: String,
}

/// 评论应用服务：发表、回复、删除、点赞
pub struct CommentAppService {
    comment_repo: Arc<dyn CommentRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl CommentAppService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            comment_repo,
            notification_repo,
            catalog_repo,
            id_generator,
        }
    }

    pub async fn post_comment(&self, cmd: PostCommentCmd) -> Result<Comment, AppError> {
        if !self.catalog_repo.exists(&cmd.resource).await? {
            return Err(CatalogError::not_found(&cmd.resource).into());
        }
        let id = CommentId::from(self.id_generator.next_id().await?);
        let comment = Comment::new(id, cmd.resource, &cmd.username, &cmd.content)?;
        self.comment_repo.insert(&comment).await?;
        info!(
            "comment {} posted on {} by {}",
            comment.id, comment.resource, comment.username
        );
        Ok(comment)
    }

    /// 回复任意评论；回复总是挂在顶层评论下，并通知被回复者
    pub async fn reply(&self, cmd: ReplyCommentCmd) -> Result<Comment, AppError> {
        let target = self.load(cmd.comment_id).await?;
        let id = CommentId::from(self.id_generator.next_id().await?);
        let reply = target.reply(id, &cmd.username, &cmd.content)?;
        self.comment_repo.insert(&reply).await?;

        self.notify(&target, &cmd.username, reply.id, NotificationKind::Reply)
            .await?;

        info!(
            "comment {} replied to {} by {}",
            reply.id, target.id, reply.username
        );
        Ok(reply)
    }

    /// 只有作者可以删除；返回删除的评论数（含回复）
    pub async fn delete_comment(&self, comment_id: i64, username: &str) -> Result<u64, AppError> {
        let comment = self.load(comment_id).await?;
        comment.ensure_author(username)?;
        let removed = self.comment_repo.delete_cascade(&comment).await?;
        info!(
            "comment {} deleted by {}, {} comments removed",
            comment.id, username, removed
        );
        Ok(removed)
    }

    /// 点赞，返回最新点赞数
    pub async fn like(&self, comment_id: i64, username: &str) -> Result<i64, AppError> {
        let comment = self.load(comment_id).await?;
        let like_id = CommentLikeId::from(self.id_generator.next_id().await?);
        let like = CommentLike::new(like_id, comment.id, username);
        let like_count = self.comment_repo.add_like(&like).await?;

        self.notify(&comment, username, comment.id, NotificationKind::Like)
            .await?;

        Ok(like_count)
    }

    /// 取消点赞，同时撤回尚未读的点赞通知
    pub async fn unlike(&self, comment_id: i64, username: &str) -> Result<i64, AppError> {
        let comment = self.load(comment_id).await?;
        let like_count = self.comment_repo.remove_like(comment.id, username).await?;

        let withdrawn = self
            .notification_repo
            .withdraw(NotificationKind::Like, comment.id, username)
            .await?;
        if withdrawn > 0 {
            info!("withdrew {} like notification(s) for comment {}", withdrawn, comment.id);
        }

        Ok(like_count)
    }

    async fn load(&self, comment_id: i64) -> Result<Comment, AppError> {
        let comment = self
            .comment_repo
            .find_by_id(CommentId::from(comment_id))
            .await?
            .ok_or(CommentError::NotFound(comment_id))?;
        Ok(comment)
    }

    async fn notify(
        &self,
        target: &Comment,
        sender: &str,
        comment_id: CommentId,
        kind: NotificationKind,
    ) -> Result<(), AppError> {
        let id = NotificationId::from(self.id_generator.next_id().await?);
        match Notification::between(id, &target.username, sender, comment_id, kind) {
            Some(notification) => {
                self.notification_repo.insert(&notification).await?;
            }
            None => debug!("skip {} notification to self: {}", kind, sender),
        }
        Ok(())
    }
}
