use crate::api::error::ApiError;
use crate::api::extract::AuthUser;
use crate::api::response::success;
use crate::consts;
use crate::middleware::other::client_ip;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use application::auth::UserClaims;
use application::command::user::UpdateProfileCmd;
use domain::user::User;
use log::{info, warn};
use model::user::UserProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 按客户端 IP 统计登录次数的滑动窗口
pub struct RateLimiter {
    attempts: HashMap<String, Vec<Instant>>,
    max_attempts: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_attempts: usize, window_secs: u64) -> Self {
        Self {
            attempts: HashMap::new(),
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn is_allowed(&mut self, ip: &str) -> bool {
        self.is_allowed_at(ip, Instant::now())
    }

    fn is_allowed_at(&mut self, ip: &str, now: Instant) -> bool {
        let window = self.window;
        // 顺带清掉其它 IP 的过期记录
        self.attempts.retain(|_, attempts| {
            attempts.retain(|t| now.duration_since(*t) < window);
            !attempts.is_empty()
        });

        let attempts = self.attempts.entry(ip.to_string()).or_default();
        if attempts.len() >= self.max_attempts {
            false
        } else {
            attempts.push(now);
            true
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileRequest {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

fn profile(user: User) -> UserProfile {
    UserProfile {
        username: user.username,
        nickname: user.nickname,
        avatar: user.avatar,
        created_at: user.created_at,
    }
}

pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = state
        .auth_service()
        .register(&body.username, &body.password)
        .await?;
    Ok(success(
        "注册成功",
        RegisterResponse {
            username: user.username,
        },
    ))
}

pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ApiError> {
    let ip = client_ip(&req, &state.app_cfg.server().trusted_proxies);
    if !state.login_limiter.lock().is_allowed(&ip) {
        warn!("login throttled for {}", ip);
        return Err(ApiError::TooManyRequests(
            consts::MSG_TOO_MANY_ATTEMPTS.to_string(),
        ));
    }

    let result = state
        .auth_service()
        .login(body.username.trim(), &body.password)
        .await?;
    info!("user logged in: {} from {}", result.username, ip);
    Ok(success(
        "登录成功",
        LoginResponse {
            username: result.username,
            token: result.token,
        },
    ))
}

pub async fn info(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse, ApiError> {
    let user = state
        .auth_service()
        .current_user(&UserClaims { user_name: user.0 })
        .await?;
    Ok(success("获取用户信息成功", profile(user)))
}

pub async fn update_profile(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user = state
        .user_service()
        .update_profile(UpdateProfileCmd {
            username: user.0,
            nickname: body.nickname,
            avatar: body.avatar,
        })
        .await?;
    Ok(success("资料修改成功", profile(user)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/register", web::post().to(register))
        .route("/user/login", web::post().to(login))
        .route("/user/info", web::get().to(info))
        .route("/user/profile", web::put().to(update_profile));
}
