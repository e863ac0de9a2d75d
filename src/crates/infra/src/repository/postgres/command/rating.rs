use super::db_data::rating::{self, ActiveModel, Entity};
use async_trait::async_trait;
use domain::rating::{Rating, RatingError, RatingRepository};
use domain::value::ResourceRef;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct RatingRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RatingRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingRepositoryImpl {
    async fn find(
        &self,
        resource: &ResourceRef,
        username: &str,
    ) -> Result<Option<Rating>, RatingError> {
        let result = Entity::find()
            .filter(rating::Column::ResourceType.eq(resource.kind.as_str()))
            .filter(rating::Column::ResourceId.eq(resource.id.as_str()))
            .filter(rating::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RatingError::DbErr(e.to_string()))?;
        result.map(Rating::try_from).transpose()
    }

    async fn save(&self, rating: &Rating) -> Result<(), RatingError> {
        let active_model: ActiveModel = rating.into();
        // (resource_type, resource_id, username) 冲突时覆盖分数
        Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    rating::Column::ResourceType,
                    rating::Column::ResourceId,
                    rating::Column::Username,
                ])
                .update_columns([rating::Column::Score, rating::Column::UpdatedAt])
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| RatingError::DbErr(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::value::ResourceKind;

    #[tokio::test]
    async fn test_find_maps_half_star_score() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![rating::Model {
                id: 7,
                resource_type: "single".to_string(),
                resource_id: "x1".to_string(),
                username: "taozhe".to_string(),
                score: 3.5,
                created_at: at,
                updated_at: at,
            }]])
            .into_connection();
        let repo = RatingRepositoryImpl::new(Arc::new(db));
        let rating = repo
            .find(&ResourceRef::new(ResourceKind::Single, "x1"), "taozhe")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rating.resource.kind, ResourceKind::Single);
        assert_eq!(rating.score.halves(), 7);
    }

    #[tokio::test]
    async fn test_find_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<rating::Model>::new()])
            .into_connection();
        let repo = RatingRepositoryImpl::new(Arc::new(db));
        let result = repo
            .find(&ResourceRef::new(ResourceKind::Song, "s1"), "nobody")
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
