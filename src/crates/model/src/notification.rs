use crate::pagination::Pagination;
use crate::shared::id_as_string;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub sender: String,
    pub sender_nickname: String,
    pub sender_avatar: Option<String>,
    #[serde(serialize_with = "id_as_string")]
    pub comment_id: i64,
    pub comment_excerpt: String,
    pub resource_type: String,
    pub resource_id: String,
    pub read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NotificationPage {
    pub notifications: Vec<NotificationView>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread_count: u64,
}

/// 截取评论开头作为摘要
pub fn excerpt(content: &str) -> String {
    if content.chars().count() <= EXCERPT_CHARS {
        return content.to_string();
    }
    let mut s: String = content.chars().take(EXCERPT_CHARS).collect();
    s.push('…');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("短评"), "短评");
        let long = "好".repeat(60);
        let e = excerpt(&long);
        assert_eq!(e.chars().count(), EXCERPT_CHARS + 1);
        assert!(e.ends_with('…'));
    }
}
