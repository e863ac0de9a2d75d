use super::value::{RatingId, ResourceRef};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingError {
    #[error("score must be a half-star step between 0.5 and 5")]
    InvalidScore(String),
    #[error("{0}")]
    DbErr(String),
}

/// 半星评分，内部以“半星个数”保存（1..=10）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MIN_HALVES: u8 = 1;
    pub const MAX_HALVES: u8 = 10;

    pub fn from_halves(halves: i64) -> Result<Self, RatingError> {
        if halves < Self::MIN_HALVES as i64 || halves > Self::MAX_HALVES as i64 {
            return Err(RatingError::InvalidScore(format!("{}", halves as f64 / 2.0)));
        }
        Ok(Self(halves as u8))
    }

    pub fn halves(&self) -> u8 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 2.0
    }
}

impl TryFrom<f64> for Score {
    type Error = RatingError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        if !doubled.is_finite() || doubled.fract() != 0.0 {
            return Err(RatingError::InvalidScore(value.to_string()));
        }
        Score::from_halves(doubled as i64)
    }
}

/// 评分聚合：每个用户对每个资源至多一条
#[derive(Debug, Clone)]
pub struct Rating {
    pub id: RatingId,
    pub resource: ResourceRef,
    pub username: String,
    pub score: Score,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Rating {
    pub fn new(id: RatingId, resource: ResourceRef, username: &str, score: Score) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id,
            resource,
            username: username.to_string(),
            score,
            created_at: now,
            updated_at: now,
        }
    }

    /// 覆盖已有评分
    pub fn rescore(&mut self, score: Score) -> &mut Self {
        self.score = score;
        self.updated_at = Utc::now().naive_utc();
        self
    }
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find(
        &self,
        resource: &ResourceRef,
        username: &str,
    ) -> Result<Option<Rating>, RatingError>;

    /// 新增或更新，依赖 (resource_type, resource_id, username) 唯一约束
    async fn save(&self, rating: &Rating) -> Result<(), RatingError>;
}
