use crate::repository::postgres::command::db_data::comment_like;
use application::query::dao::CommentDao;
use application::query::QueryError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::value::ResourceRef;
use model::comment::{CommentSort, CommentView};
use sea_orm::*;
use std::sync::Arc;
use std::collections::HashSet;

pub struct CommentDaoImpl {
    db: Arc<DatabaseConnection>,
}

impl CommentDaoImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

const COMMENT_COLUMNS: &str = r#"
    c.id, c.resource_type, c.resource_id, c.username,
    COALESCE(u.nickname, c.username) AS nickname,
    u.avatar,
    c.content, c.parent_id, c.reply_to_comment_id, c.reply_to_username,
    c.like_count, c.created_at
"#;

#[derive(Debug, Clone, FromQueryResult)]
struct CountRow {
    pub total: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
struct CommentRow {
    pub id: i64,
    pub resource_type: String,
    pub resource_id: String,
    pub username: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub content: String,
    pub parent_id: Option<i64>,
    pub reply_to_comment_id: Option<i64>,
    pub reply_to_username: Option<String>,
    pub like_count: i64,
    pub created_at: NaiveDateTime,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        CommentView {
            id: row.id,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            username: row.username,
            nickname: row.nickname,
            avatar: row.avatar,
            content: row.content,
            parent_id: row.parent_id,
            reply_to_comment_id: row.reply_to_comment_id,
            reply_to_username: row.reply_to_username,
            like_count: row.like_count,
            liked: false,
            created_at: row.created_at,
        }
    }
}

fn order_clause(sort: CommentSort) -> &'static str {
    match sort {
        CommentSort::Latest => "c.created_at DESC, c.id DESC",
        CommentSort::Hot => "c.like_count DESC, c.created_at DESC, c.id DESC",
    }
}

#[async_trait]
impl CommentDao for CommentDaoImpl {
    async fn count_roots(&self, resource: &ResourceRef) -> Result<u64, QueryError> {
        let row = CountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"SELECT COUNT(*) AS total
               FROM comment c
               WHERE c.resource_type = $1 AND c.resource_id = $2 AND c.parent_id IS NULL"#,
            vec![resource.kind.as_str().into(), resource.id.clone().into()],
        ))
        .one(self.db.as_ref())
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(row.map(|r| r.total.max(0) as u64).unwrap_or(0))
    }

    async fn list_roots(
        &self,
        resource: &ResourceRef,
        sort: CommentSort,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<CommentView>, QueryError> {
        let sql = format!(
            r#"SELECT {}
               FROM comment c
               LEFT JOIN users u ON u.username = c.username
               WHERE c.resource_type = $1 AND c.resource_id = $2 AND c.parent_id IS NULL
               ORDER BY {}
               LIMIT $3 OFFSET $4"#,
            COMMENT_COLUMNS,
            order_clause(sort)
        );
        let rows: Vec<CommentRow> = CommentRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![
                resource.kind.as_str().into(),
                resource.id.clone().into(),
                i64::try_from(limit).unwrap_or(i64::MAX).into(),
                i64::try_from(offset).unwrap_or(i64::MAX).into(),
            ],
        ))
        .all(self.db.as_ref())
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(CommentView::from).collect())
    }

    async fn list_replies(&self, root_ids: &[i64]) -> Result<Vec<CommentView>, QueryError> {
        if root_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=root_ids.len()).map(|i| format!("${}", i)).collect();
        let sql = format!(
            r#"SELECT {}
               FROM comment c
               LEFT JOIN users u ON u.username = c.username
               WHERE c.parent_id IN ({})
               ORDER BY c.created_at ASC, c.id ASC"#,
            COMMENT_COLUMNS,
            placeholders.join(", ")
        );
        let values: Vec<Value> = root_ids.iter().map(|id| (*id).into()).collect();
        let rows: Vec<CommentRow> = CommentRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            values,
        ))
        .all(self.db.as_ref())
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(CommentView::from).collect())
    }

    async fn liked_by(
        &self,
        username: &str,
        comment_ids: &[i64],
    ) -> Result<HashSet<i64>, QueryError> {
        if comment_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids: Vec<i64> = comment_like::Entity::find()
            .select_only()
            .column(comment_like::Column::CommentId)
            .filter(comment_like::Column::Username.eq(username))
            .filter(comment_like::Column::CommentId.is_in(comment_ids.iter().copied()))
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use domain::value::ResourceKind;
    use std::collections::BTreeMap;

    fn row(id: i64, parent_id: Option<i64>, nickname: &str) -> BTreeMap<&'static str, Value> {
        let created_at = DateTime::from_timestamp(1_700_000_000 + id, 0)
            .unwrap()
            .naive_utc();
        BTreeMap::from([
            ("id", Value::from(id)),
            ("resource_type", Value::from("song")),
            ("resource_id", Value::from("s1")),
            ("username", Value::from("alice")),
            ("nickname", Value::from(nickname)),
            ("avatar", Value::String(None)),
            ("content", Value::from("好听")),
            ("parent_id", Value::BigInt(parent_id)),
            ("reply_to_comment_id", Value::BigInt(parent_id)),
            ("reply_to_username", Value::String(None)),
            ("like_count", Value::from(0i64)),
            ("created_at", Value::from(created_at)),
        ])
    }

    #[test]
    fn test_order_clause() {
        assert!(order_clause(CommentSort::Latest).starts_with("c.created_at DESC"));
        assert!(order_clause(CommentSort::Hot).starts_with("c.like_count DESC"));
    }

    #[tokio::test]
    async fn test_list_roots_leaves_liked_unset() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(2, None, "爱丽丝"), row(1, None, "alice")]])
            .into_connection();
        let dao = CommentDaoImpl::new(Arc::new(db));
        let roots = dao
            .list_roots(
                &ResourceRef::new(ResourceKind::Song, "s1"),
                CommentSort::Latest,
                0,
                20,
            )
            .await
            .unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].nickname, "爱丽丝");
        assert!(roots.iter().all(|c| !c.liked && c.parent_id.is_none()));
    }

    #[tokio::test]
    async fn test_empty_inputs_skip_queries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let dao = CommentDaoImpl::new(Arc::new(db));
        assert!(dao.list_replies(&[]).await.unwrap().is_empty());
        assert!(dao.liked_by("alice", &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_liked_by() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                BTreeMap::from([("comment_id", Value::from(3i64))]),
                BTreeMap::from([("comment_id", Value::from(5i64))]),
            ]])
            .into_connection();
        let dao = CommentDaoImpl::new(Arc::new(db));
        let liked = dao.liked_by("alice", &[3, 4, 5]).await.unwrap();
        assert_eq!(liked, HashSet::from([3, 5]));
    }
}
