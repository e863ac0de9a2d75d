use crate::repository::postgres::command::db_data::rating;
use application::query::dao::RatingDao;
use application::query::QueryError;
use async_trait::async_trait;
use domain::value::{ResourceKind, ResourceRef};
use model::rating::RatingStats;
use sea_orm::*;
use std::sync::Arc;
use std::collections::HashMap;

pub struct RatingDaoImpl {
    db: Arc<DatabaseConnection>,
}

impl RatingDaoImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct StatsRow {
    pub average: Option<f64>,
    pub total: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
struct GroupedStatsRow {
    pub resource_id: String,
    pub average: f64,
    pub total: i64,
}

#[async_trait]
impl RatingDao for RatingDaoImpl {
    async fn get_stats(&self, resource: &ResourceRef) -> Result<RatingStats, QueryError> {
        let row = StatsRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"SELECT AVG(score)::float8 AS average, COUNT(*) AS total
               FROM rating
               WHERE resource_type = $1 AND resource_id = $2"#,
            vec![resource.kind.as_str().into(), resource.id.clone().into()],
        ))
        .one(self.db.as_ref())
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;

        Ok(match row {
            Some(row) => RatingStats {
                average_score: row.average.unwrap_or(0.0),
                rating_count: row.total,
            },
            None => RatingStats::default(),
        })
    }

    async fn get_stats_by_kind(
        &self,
        kind: ResourceKind,
    ) -> Result<HashMap<String, RatingStats>, QueryError> {
        let rows: Vec<GroupedStatsRow> =
            GroupedStatsRow::find_by_statement(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"SELECT resource_id, AVG(score)::float8 AS average, COUNT(*) AS total
                   FROM rating
                   WHERE resource_type = $1
                   GROUP BY resource_id"#,
                vec![kind.as_str().into()],
            ))
            .all(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.resource_id,
                    RatingStats {
                        average_score: row.average,
                        rating_count: row.total,
                    },
                )
            })
            .collect())
    }

    async fn get_user_score(
        &self,
        resource: &ResourceRef,
        username: &str,
    ) -> Result<Option<f64>, QueryError> {
        let score: Option<f64> = rating::Entity::find()
            .select_only()
            .column(rating::Column::Score)
            .filter(rating::Column::ResourceType.eq(resource.kind.as_str()))
            .filter(rating::Column::ResourceId.eq(resource.id.as_str()))
            .filter(rating::Column::Username.eq(username))
            .into_tuple()
            .one(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stats_row(average: Option<f64>, total: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("average", average.into()), ("total", total.into())])
    }

    #[tokio::test]
    async fn test_get_stats_keeps_raw_average() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stats_row(Some(4.25), 4)]])
            .into_connection();
        let dao = RatingDaoImpl::new(Arc::new(db));
        let stats = dao
            .get_stats(&ResourceRef::new(ResourceKind::Song, "s1"))
            .await
            .unwrap();
        assert_eq!(stats.average_score, 4.25);
        assert_eq!(stats.rating_count, 4);
    }

    #[tokio::test]
    async fn test_get_stats_without_ratings() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stats_row(None, 0)]])
            .into_connection();
        let dao = RatingDaoImpl::new(Arc::new(db));
        let stats = dao
            .get_stats(&ResourceRef::new(ResourceKind::Single, "x1"))
            .await
            .unwrap();
        assert_eq!(stats, RatingStats::default());
    }

    #[tokio::test]
    async fn test_get_stats_by_kind() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                BTreeMap::from([
                    ("resource_id", Value::from("s1")),
                    ("average", 4.5f64.into()),
                    ("total", 2i64.into()),
                ]),
                BTreeMap::from([
                    ("resource_id", Value::from("s2")),
                    ("average", 3.0f64.into()),
                    ("total", 1i64.into()),
                ]),
            ]])
            .into_connection();
        let dao = RatingDaoImpl::new(Arc::new(db));
        let stats = dao.get_stats_by_kind(ResourceKind::Song).await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["s1"].rating_count, 2);
        assert_eq!(stats["s2"].average_score, 3.0);
    }
}
