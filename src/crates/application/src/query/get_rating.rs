use crate::query::dao::RatingDao;
use crate::query::QueryError;
use domain::value::ResourceRef;
use model::rating::{RatingStats, UserScore};
use std::sync::Arc;

#[derive(Clone)]
pub struct GetRating {
    dao: Arc<dyn RatingDao + Send + Sync>,
}

impl GetRating {
    pub fn new(dao: Arc<dyn RatingDao + Send + Sync>) -> Self {
        Self { dao }
    }

    /// 平均分保留一位小数，未被评分时为 {0, 0}
    pub async fn average(&self, resource: &ResourceRef) -> Result<RatingStats, QueryError> {
        let stats = self.dao.get_stats(resource).await?;
        if stats.rating_count == 0 {
            return Ok(RatingStats::default());
        }
        Ok(RatingStats::new(stats.average_score, stats.rating_count))
    }

    pub async fn user_score(
        &self,
        resource: &ResourceRef,
        username: &str,
    ) -> Result<UserScore, QueryError> {
        let score = self.dao.get_user_score(resource, username).await?;
        Ok(UserScore {
            score: score.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryRatingDao;
    use domain::value::ResourceKind;

    #[tokio::test]
    async fn test_average_is_rounded() {
        let dao = Arc::new(InMemoryRatingDao::default());
        dao.rate(ResourceKind::Song, "s1", "alice", 4.5);
        dao.rate(ResourceKind::Song, "s1", "bob", 4.0);
        dao.rate(ResourceKind::Song, "s1", "carol", 4.0);
        let query = GetRating::new(dao);

        let stats = query
            .average(&ResourceRef::new(ResourceKind::Song, "s1"))
            .await
            .unwrap();
        assert_eq!(stats.average_score, 4.2);
        assert_eq!(stats.rating_count, 3);

        let empty = query
            .average(&ResourceRef::new(ResourceKind::Single, "s1"))
            .await
            .unwrap();
        assert_eq!(empty, RatingStats::default());
    }

    #[tokio::test]
    async fn test_user_score_defaults_to_zero() {
        let dao = Arc::new(InMemoryRatingDao::default());
        dao.rate(ResourceKind::Single, "x1", "alice", 3.5);
        let query = GetRating::new(dao);
        let resource = ResourceRef::new(ResourceKind::Single, "x1");
        assert_eq!(query.user_score(&resource, "alice").await.unwrap().score, 3.5);
        assert_eq!(query.user_score(&resource, "bob").await.unwrap().score, 0.0);
    }
}
