use std::sync::Arc;

use super::shared::IdGenerator;
use crate::error::AppError;
use domain::catalog::{CatalogError, CatalogRepository};
use domain::rating::{Rating, RatingRepository, Score};
use domain::value::{RatingId, ResourceRef};
use log::info;

/// 提交评分命令
#[derive(Debug)]
pub struct SubmitRatingCmd {
    pub resource: ResourceRef,
    pub username: String,
    pub score: f64,
}

/// 评分提交结果，updated 表示覆盖了已有评分
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRatingResult {
    pub score: f64,
    pub updated: bool,
}

pub struct RatingAppService {
    rating_repo: Arc<dyn RatingRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl RatingAppService {
    pub fn new(
        rating_repo: Arc<dyn RatingRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            rating_repo,
            catalog_repo,
            id_generator,
        }
    }

    /// 新建或更新评分，同一用户对同一资源只保留一条
    pub async fn submit(&self, cmd: SubmitRatingCmd) -> Result<SubmitRatingResult, AppError> {
        if !self.catalog_repo.exists(&cmd.resource).await? {
            return Err(CatalogError::not_found(&cmd.resource).into());
        }

        let score = Score::try_from(cmd.score)?;

        let (rating, updated) = match self.rating_repo.find(&cmd.resource, &cmd.username).await? {
            Some(mut rating) => {
                rating.rescore(score);
                (rating, true)
            }
            None => {
                let id = RatingId::from(self.id_generator.next_id().await?);
                (Rating::new(id, cmd.resource.clone(), &cmd.username, score), false)
            }
        };
        self.rating_repo.save(&rating).await?;

        info!(
            "rating {} on {} by {}: {}",
            if updated { "updated" } else { "submitted" },
            cmd.resource,
            cmd.username,
            score.as_f64()
        );

        Ok(SubmitRatingResult {
            score: score.as_f64(),
            updated,
        })
    }
}
