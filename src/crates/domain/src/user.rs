use super::value::UserId;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NICKNAME_LEN: usize = 30;
pub const MAX_AVATAR_LEN: usize = 512;

/// 用户领域错误
///
/// 用户领域中可能发生的所有错误类型。
#[derive(Error, Debug)]
pub enum UserError {
    #[error("username and password are required")]
    MissingCredentials,
    #[error("username must be at least 3 characters")]
    InvalidUsername,
    #[error("password must be at least 6 characters")]
    InvalidPassword,
    #[error("username already exists")]
    UsernameTaken(String),
    #[error("username does not exist: {0}")]
    UnknownUsername(String),
    #[error("wrong password")]
    WrongPassword,
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("nickname must be 1 to 30 characters")]
    InvalidNickname,
    #[error("avatar url must be at most 512 characters")]
    InvalidAvatar,
    #[error("version conflict: {0}")]
    VersionConflictErr(i64),
    #[error("{0}")]
    DbErr(String),
}

/// 用户聚合根
///
/// 代表一个可以登录、评分、评论的社区用户。
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,                 // 用户唯一标识符
    pub username: String,           // 登录名，唯一
    pub nickname: String,           // 显示名称，默认与登录名相同
    pub avatar: Option<String>,     // 头像 URL
    pub password: String,           // 加密后的密码 (bcrypt)
    pub created_at: NaiveDateTime,  // 注册时间
    pub updated_at: NaiveDateTime,  // 最后修改时间
    pub version: i64,               // 当前版本，用于乐观锁
}

impl User {
    pub fn new(id: UserId, username: &str, hashed_password: &str) -> Result<Self, UserError> {
        let username = username.trim();
        Self::check_username(username)?;
        let now = Utc::now().naive_utc();
        Ok(User {
            id,
            username: String::from(username),
            nickname: String::from(username),
            avatar: None,
            password: String::from(hashed_password),
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    pub fn check_username(username: &str) -> Result<(), UserError> {
        if username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(UserError::InvalidUsername);
        }
        Ok(())
    }

    /// 校验明文密码长度，需在哈希之前调用
    pub fn check_plain_password(plain: &str) -> Result<(), UserError> {
        if plain.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserError::InvalidPassword);
        }
        Ok(())
    }

    pub fn update_profile(
        &mut self,
        nickname: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<&mut Self, UserError> {
        if let Some(nickname) = nickname {
            let nickname = nickname.trim();
            let len = nickname.chars().count();
            if len == 0 || len > MAX_NICKNAME_LEN {
                return Err(UserError::InvalidNickname);
            }
            self.nickname = String::from(nickname);
        }

        if let Some(avatar) = avatar {
            let avatar = avatar.trim();
            if avatar.chars().count() > MAX_AVATAR_LEN {
                return Err(UserError::InvalidAvatar);
            }
            // 空字符串表示清除头像
            self.avatar = (!avatar.is_empty()).then(|| String::from(avatar));
        }

        self.updated_at = Utc::now().naive_utc();
        Ok(self)
    }
}

/// 用户仓储接口
///
/// 定义领域需要的仓储能力，由基础设施层实现。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据用户名查找用户
    async fn find_by_username<'a>(&'a self, username: &'a str) -> Result<Option<User>, UserError>;

    /// 保存用户（创建或更新）
    async fn save<'a>(&'a self, user: &User) -> Result<(), UserError>;
}
