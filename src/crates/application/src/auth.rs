use std::sync::Arc;

use crate::command::shared::IdGenerator;
use crate::error::AppError;
use domain::user::{User, UserError, UserRepository};
use domain::value::UserId;
use log::info;

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, AppError>;
    fn verify(&self, pwd: &str, hashed_pwd: &str) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserClaims {
    pub user_name: String, // user name
}

impl From<&User> for UserClaims {
    fn from(user: &User) -> Self {
        Self {
            user_name: user.username.clone(),
        }
    }
}

pub trait TokenService: Send + Sync {
    fn issue(&self, claims: &UserClaims) -> Result<String, AppError>;
    fn verify(&self, token: &str) -> Result<UserClaims, AppError>;
}

/// 登录成功后的结果
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub username: String,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    token_svc: Arc<dyn TokenService>,
    id_generator: Arc<dyn IdGenerator>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        token_svc: Arc<dyn TokenService>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            token_svc,
            id_generator,
        }
    }

    /// Register a new user, password is stored as bcrypt hash
    pub async fn register(&self, username: &str, pwd: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() || pwd.is_empty() {
            return Err(UserError::MissingCredentials.into());
        }
        User::check_username(username)?;
        User::check_plain_password(pwd)?;
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(UserError::UsernameTaken(username.to_string()).into());
        }

        let hashed_pwd = self.hasher.hash(pwd)?;
        let id = UserId::from(self.id_generator.next_id().await?);
        let user = User::new(id, username, &hashed_pwd)?;
        self.user_repo.save(&user).await?;
        info!("user registered: {}", user.username);
        Ok(user)
    }

    /// Login with username and password, returns JWT token
    pub async fn login(&self, username: &str, pwd: &str) -> Result<LoginResult, AppError> {
        if username.is_empty() || pwd.is_empty() {
            return Err(UserError::MissingCredentials.into());
        }
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::UnknownUsername(username.to_string()))?;
        self.hasher
            .verify(pwd, &user.password)
            .map_err(|_| UserError::WrongPassword)?;
        let token = self.token_svc.issue(&UserClaims::from(&user))?;
        Ok(LoginResult {
            username: user.username,
            token,
        })
    }

    /// 查询 token 对应的用户
    pub async fn current_user(&self, claims: &UserClaims) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_username(&claims.user_name)
            .await?
            .ok_or_else(|| UserError::UserNotFound(claims.user_name.clone()))?;
        Ok(user)
    }
}
