use crate::{consts, AppState};
use actix_service::{forward_ready, Service, Transform};
use actix_web::{dev::ServiceRequest, dev::ServiceResponse, web, Error, HttpMessage, HttpRequest};
use application::auth::{TokenService, UserClaims};
use application::error::AppError;
use futures::future::{ok, LocalBoxFuture, Ready};
use log::debug;
use std::rc::Rc;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JwtError {
    #[error("not logged in")]
    NoTokenFound,
    #[error("invalid token")]
    Invalid(String),
    #[error("token expired")]
    Expired,
}

impl From<AppError> for JwtError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::TokenExpired => JwtError::Expired,
            other => JwtError::Invalid(other.to_string()),
        }
    }
}

/// 请求携带的令牌的校验结果，由 JwtVerifier 写入 request extensions
#[derive(Debug, Clone)]
pub struct TokenState(pub Result<UserClaims, JwtError>);

/// 解析并校验令牌，但不拦截请求；
/// 是否必须登录由各接口的提取器（AuthUser / Option<AuthUser>）决定
pub struct JwtVerifier;

impl<S, B> Transform<S, ServiceRequest> for JwtVerifier
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtVerifyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtVerifyMiddleware {
            service: Rc::new(service),
        })
    }
}

pub struct JwtVerifyMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtVerifyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let token_state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => verify_jwt(state, req.request(), &[token_from_header, token_from_query]),
            None => Err(JwtError::Invalid("missing app state".to_string())),
        };
        if let Err(ref e) = token_state {
            if *e != JwtError::NoTokenFound {
                debug!("{} {}: {:?}", req.method(), req.path(), e);
            }
        }
        req.extensions_mut().insert(TokenState(token_state));
        Box::pin(async move { service.call(req).await })
    }
}

// 提取令牌的函数类型
type TokenFinder = fn(req: &HttpRequest) -> Option<String>;

fn token_from_header(req: &HttpRequest) -> Option<String> {
    let auth_str = req.headers().get("Authorization")?.to_str().ok()?;
    auth_str
        .strip_prefix(consts::BEARER_PREFIX)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn token_from_query(req: &HttpRequest) -> Option<String> {
    let url = Url::parse(&format!("http://localhost/?{}", req.query_string())).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == consts::TOKEN_QUERY_PARAM)
        .map(|(_, value)| value.to_string())
        .filter(|token| !token.is_empty())
}

fn verify_jwt(
    state: &AppState,
    req: &HttpRequest,
    token_finders: &[TokenFinder],
) -> Result<UserClaims, JwtError> {
    let token_str = token_finders
        .iter()
        .find_map(|finder| finder(req))
        .ok_or(JwtError::NoTokenFound)?;
    let claims = state.token_service().verify(&token_str)?;
    Ok(claims)
}
