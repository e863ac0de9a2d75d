use super::error::ApiError;
use crate::middleware::jwt_verify::{JwtError, TokenState};
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

/// 已登录用户；未登录或令牌无效时返回 401
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser(pub String);

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<TokenState>() {
            Some(TokenState(Ok(claims))) => Ok(AuthUser(claims.user_name.clone())),
            Some(TokenState(Err(e))) => Err(e.clone().into()),
            None => Err(JwtError::NoTokenFound.into()),
        };
        ready(result)
    }
}
