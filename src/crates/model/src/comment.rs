use crate::pagination::Pagination;
use crate::shared::{id_as_string, opt_id_as_string};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// 评论排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    /// 最新优先
    #[default]
    Latest,
    /// 点赞数优先，其次最新
    Hot,
}

impl CommentSort {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") | Some("latest") => Some(CommentSort::Latest),
            Some("hot") => Some(CommentSort::Hot),
            _ => None,
        }
    }
}

/// 单条评论（顶层或回复）的展示数据
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub resource_type: String,
    pub resource_id: String,
    pub username: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub content: String,
    #[serde(serialize_with = "opt_id_as_string")]
    pub parent_id: Option<i64>,
    #[serde(serialize_with = "opt_id_as_string")]
    pub reply_to_comment_id: Option<i64>,
    pub reply_to_username: Option<String>,
    pub like_count: i64,
    pub liked: bool,
    pub created_at: NaiveDateTime,
}

/// 顶层评论及其全部回复（回复按时间正序）
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: CommentView,
    pub reply_count: usize,
    pub replies: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentPage {
    pub comments: Vec<CommentThread>,
    pub pagination: Pagination,
}

/// 把回复挂到对应的顶层评论下，保持 roots 的顺序
pub fn assemble_threads(roots: Vec<CommentView>, replies: Vec<CommentView>) -> Vec<CommentThread> {
    let mut by_parent: HashMap<i64, Vec<CommentView>> = HashMap::new();
    for reply in replies {
        if let Some(parent_id) = reply.parent_id {
            by_parent.entry(parent_id).or_default().push(reply);
        }
    }
    roots
        .into_iter()
        .map(|root| {
            let mut replies = by_parent.remove(&root.id).unwrap_or_default();
            replies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            CommentThread {
                reply_count: replies.len(),
                comment: root,
                replies,
            }
        })
        .collect()
}

/// 新建评论后返回给客户端的数据
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostedComment {
    #[serde(serialize_with = "id_as_string")]
    pub comment_id: i64,
    pub resource_type: String,
    pub resource_id: String,
    pub username: String,
    pub content: String,
    #[serde(serialize_with = "opt_id_as_string")]
    pub parent_id: Option<i64>,
    #[serde(serialize_with = "opt_id_as_string")]
    pub reply_to_comment_id: Option<i64>,
    pub reply_to_username: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub liked: bool,
    pub like_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn view(id: i64, parent_id: Option<i64>, ts: i64) -> CommentView {
        CommentView {
            id,
            resource_type: "song".into(),
            resource_id: "s1".into(),
            username: "u".into(),
            nickname: "u".into(),
            avatar: None,
            content: "c".into(),
            parent_id,
            reply_to_comment_id: parent_id,
            reply_to_username: None,
            like_count: 0,
            liked: false,
            created_at: DateTime::from_timestamp(ts, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(CommentSort::parse(None), Some(CommentSort::Latest));
        assert_eq!(CommentSort::parse(Some("hot")), Some(CommentSort::Hot));
        assert_eq!(CommentSort::parse(Some("oldest")), None);
    }

    #[test]
    fn test_assemble_threads() {
        let roots = vec![view(10, None, 300), view(20, None, 200)];
        let replies = vec![view(13, Some(10), 330), view(11, Some(10), 310), view(21, Some(20), 210)];
        let threads = assemble_threads(roots, replies);
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].comment.id, 10);
        assert_eq!(threads[0].reply_count, 2);
        assert_eq!(
            threads[0].replies.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![11, 13]
        );
        assert_eq!(threads[1].replies[0].id, 21);
    }

    #[test]
    fn test_ids_serialized_as_strings() {
        let thread = CommentThread {
            comment: view(1234567890123, None, 0),
            reply_count: 0,
            replies: vec![],
        };
        let value = serde_json::to_value(&thread).unwrap();
        assert_eq!(value["id"], "1234567890123");
        assert!(value["parentId"].is_null());
        assert_eq!(value["replyCount"], 0);
    }
}
