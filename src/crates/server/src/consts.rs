pub const BEARER_PREFIX: &str = "Bearer ";
pub const TOKEN_QUERY_PARAM: &str = "token";
pub const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";
pub const REAL_IP_HEADER: &str = "X-Real-IP";

pub const MSG_NOT_LOGGED_IN: &str = "not logged in";
pub const MSG_INVALID_TOKEN: &str = "invalid token";
pub const MSG_TOKEN_EXPIRED: &str = "token expired";
pub const MSG_TOO_MANY_ATTEMPTS: &str = "too many login attempts, please try again later";
pub const MSG_SERVER_ERROR: &str = "服务器错误";
