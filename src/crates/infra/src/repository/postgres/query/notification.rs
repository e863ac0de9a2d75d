use application::query::dao::NotificationDao;
use application::query::QueryError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use model::notification::NotificationView;
use sea_orm::*;
use std::sync::Arc;

pub struct NotificationDaoImpl {
    db: Arc<DatabaseConnection>,
}

impl NotificationDaoImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct CountRow {
    pub total: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
struct NotificationRow {
    pub id: i64,
    pub kind: String,
    pub sender: String,
    pub sender_nickname: String,
    pub sender_avatar: Option<String>,
    pub comment_id: i64,
    pub content: String,
    pub resource_type: String,
    pub resource_id: String,
    pub read: bool,
    pub created_at: NaiveDateTime,
}

impl From<NotificationRow> for NotificationView {
    fn from(row: NotificationRow) -> Self {
        NotificationView {
            id: row.id,
            kind: row.kind,
            sender: row.sender,
            sender_nickname: row.sender_nickname,
            sender_avatar: row.sender_avatar,
            comment_id: row.comment_id,
            comment_excerpt: row.content,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl NotificationDao for NotificationDaoImpl {
    async fn count(&self, receiver: &str, unread_only: bool) -> Result<u64, QueryError> {
        let row = CountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"SELECT COUNT(*) AS total
               FROM notification n
               JOIN comment c ON c.id = n.comment_id
               WHERE n.receiver = $1 AND ($2 = false OR n.read = false)"#,
            vec![receiver.into(), unread_only.into()],
        ))
        .one(self.db.as_ref())
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(row.map(|r| r.total.max(0) as u64).unwrap_or(0))
    }

    async fn list(
        &self,
        receiver: &str,
        unread_only: bool,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<NotificationView>, QueryError> {
        // 评论已删除的通知随评论一并删除，这里用内连接即可
        let rows: Vec<NotificationRow> =
            NotificationRow::find_by_statement(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"SELECT
                       n.id, n.kind, n.sender,
                       COALESCE(u.nickname, n.sender) AS sender_nickname,
                       u.avatar AS sender_avatar,
                       n.comment_id, c.content, c.resource_type, c.resource_id,
                       n.read, n.created_at
                   FROM notification n
                   JOIN comment c ON c.id = n.comment_id
                   LEFT JOIN users u ON u.username = n.sender
                   WHERE n.receiver = $1 AND ($2 = false OR n.read = false)
                   ORDER BY n.created_at DESC, n.id DESC
                   LIMIT $3 OFFSET $4"#,
                vec![
                    receiver.into(),
                    unread_only.into(),
                    i64::try_from(limit).unwrap_or(i64::MAX).into(),
                    i64::try_from(offset).unwrap_or(i64::MAX).into(),
                ],
            ))
            .all(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(NotificationView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_count_unread() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("total", Value::from(3i64))])]])
            .into_connection();
        let dao = NotificationDaoImpl::new(Arc::new(db));
        assert_eq!(dao.count("alice", true).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc();
        let row = BTreeMap::from([
            ("id", Value::from(7i64)),
            ("kind", Value::from("like")),
            ("sender", Value::from("bob")),
            ("sender_nickname", Value::from("Bob")),
            ("sender_avatar", Value::String(None)),
            ("comment_id", Value::from(42i64)),
            ("content", Value::from("晴天真好听")),
            ("resource_type", Value::from("song")),
            ("resource_id", Value::from("s1")),
            ("read", Value::from(false)),
            ("created_at", Value::from(created_at)),
        ]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let dao = NotificationDaoImpl::new(Arc::new(db));
        let list = dao.list("alice", false, 0, 20).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, "like");
        assert_eq!(list[0].comment_id, 42);
        assert_eq!(list[0].comment_excerpt, "晴天真好听");
        assert!(list[0].sender_avatar.is_none());
    }
}
