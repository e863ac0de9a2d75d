use chrono::NaiveDateTime;
use serde::Serialize;

/// 当前登录用户的资料
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub created_at: NaiveDateTime,
}
