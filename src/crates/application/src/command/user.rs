use crate::error::AppError;
use domain::user::{User, UserError, UserRepository};
use std::sync::Arc;

/// 更新个人资料命令，None 表示不修改
pub struct UpdateProfileCmd {
    pub username: String,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

/// 用户应用服务
pub struct UserAppService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserAppService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 修改昵称、头像
    pub async fn update_profile(&self, cmd: UpdateProfileCmd) -> Result<User, AppError> {
        if cmd.nickname.is_none() && cmd.avatar.is_none() {
            return Err(AppError::InvalidInput(
                "nothing to update, provide nickname or avatar".to_string(),
            ));
        }

        let mut user = self
            .user_repo
            .find_by_username(&cmd.username)
            .await?
            .ok_or_else(|| UserError::UserNotFound(cmd.username.clone()))?;

        user.update_profile(cmd.nickname.as_deref(), cmd.avatar.as_deref())?;

        self.user_repo.save(&user).await?;

        Ok(user)
    }
}
