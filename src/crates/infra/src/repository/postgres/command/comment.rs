use super::db_data::comment::{self, ActiveModel, Entity};
use super::db_data::comment_like::{self, ActiveModel as LikeActiveModel, Entity as LikeEntity};
use super::db_data::notification::{self, Entity as NotificationEntity};
use async_trait::async_trait;
use domain::comment::{Comment, CommentError, CommentLike, CommentRepository};
use domain::value::CommentId;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommentRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CommentRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn like_count<C: ConnectionTrait>(
        conn: &C,
        comment_id: CommentId,
    ) -> Result<i64, CommentError> {
        let model = Entity::find_by_id(comment_id.as_i64())
            .one(conn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?
            .ok_or(CommentError::NotFound(comment_id.as_i64()))?;
        Ok(model.like_count)
    }
}

#[async_trait]
impl CommentRepository for CommentRepositoryImpl {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentError> {
        let result = Entity::find_by_id(id.as_i64())
            .one(self.db.as_ref())
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;
        result.map(Comment::try_from).transpose()
    }

    async fn insert(&self, comment: &Comment) -> Result<(), CommentError> {
        let active_model: ActiveModel = comment.into();
        Entity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;
        Ok(())
    }

    async fn delete_cascade(&self, target: &Comment) -> Result<u64, CommentError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        let mut ids = vec![target.id.as_i64()];
        if target.is_root() {
            let replies: Vec<i64> = Entity::find()
                .select_only()
                .column(comment::Column::Id)
                .filter(comment::Column::ParentId.eq(target.id.as_i64()))
                .into_tuple()
                .all(&txn)
                .await
                .map_err(|e| CommentError::DbErr(e.to_string()))?;
            ids.extend(replies);
        }

        LikeEntity::delete_many()
            .filter(comment_like::Column::CommentId.is_in(ids.clone()))
            .exec(&txn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        NotificationEntity::delete_many()
            .filter(notification::Column::CommentId.is_in(ids.clone()))
            .exec(&txn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        let result = Entity::delete_many()
            .filter(comment::Column::Id.is_in(ids))
            .exec(&txn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn add_like(&self, like: &CommentLike) -> Result<i64, CommentError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        let existing = LikeEntity::find()
            .filter(comment_like::Column::CommentId.eq(like.comment_id.as_i64()))
            .filter(comment_like::Column::Username.eq(like.username.as_str()))
            .one(&txn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;
        if existing.is_some() {
            return Err(CommentError::AlreadyLiked);
        }

        let active_model: LikeActiveModel = like.into();
        LikeEntity::insert(active_model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => CommentError::AlreadyLiked,
                _ => CommentError::DbErr(e.to_string()),
            })?;

        Entity::update_many()
            .col_expr(
                comment::Column::LikeCount,
                Expr::col(comment::Column::LikeCount).add(1),
            )
            .filter(comment::Column::Id.eq(like.comment_id.as_i64()))
            .exec(&txn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        let like_count = Self::like_count(&txn, like.comment_id).await?;

        txn.commit()
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        Ok(like_count)
    }

    async fn remove_like(&self, comment_id: CommentId, username: &str) -> Result<i64, CommentError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        let result = LikeEntity::delete_many()
            .filter(comment_like::Column::CommentId.eq(comment_id.as_i64()))
            .filter(comment_like::Column::Username.eq(username))
            .exec(&txn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(CommentError::NotLiked);
        }

        Entity::update_many()
            .col_expr(
                comment::Column::LikeCount,
                Expr::col(comment::Column::LikeCount).sub(1),
            )
            .filter(comment::Column::Id.eq(comment_id.as_i64()))
            .filter(comment::Column::LikeCount.gt(0))
            .exec(&txn)
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        let like_count = Self::like_count(&txn, comment_id).await?;

        txn.commit()
            .await
            .map_err(|e| CommentError::DbErr(e.to_string()))?;

        Ok(like_count)
    }
}
