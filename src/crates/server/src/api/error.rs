use super::response::ApiResponse;
use crate::consts;
use crate::middleware::jwt_verify::JwtError;
use actix_web::{http::StatusCode, HttpResponse};
use application::error::AppError;
use application::query::QueryError;
use domain::catalog::CatalogError;
use domain::comment::CommentError;
use domain::notification::NotificationError;
use domain::rating::RatingError;
use domain::user::UserError;
use log::error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    TooManyRequests(String),
    #[error("{0}")]
    Internal(String),
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let msg = match self {
            Self::Internal(detail) => {
                error!("internal error: {}", detail);
                consts::MSG_SERVER_ERROR.to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::<()> {
            code: self.status_code().as_u16(),
            msg,
            data: None,
        })
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::DbErr(msg) => ApiError::Internal(msg),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<RatingError> for ApiError {
    fn from(err: RatingError) -> Self {
        match err {
            RatingError::InvalidScore(_) => ApiError::BadRequest(err.to_string()),
            RatingError::DbErr(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CommentError::NotAuthor => ApiError::Forbidden(err.to_string()),
            CommentError::DbErr(msg) => ApiError::Internal(msg),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::NotFound(_) => ApiError::NotFound(err.to_string()),
            NotificationError::DbErr(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ResourceNotFound(kind, _) => ApiError::NotFound(format!("{} not found", kind)),
            CatalogError::InvalidSeed(_) => ApiError::BadRequest(err.to_string()),
            CatalogError::DbErr(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(msg) => ApiError::NotFound(msg),
            QueryError::DbError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidInput(msg) => ApiError::BadRequest(msg),
            AppError::UserError(e) => e.into(),
            AppError::RatingError(e) => e.into(),
            AppError::CommentError(e) => e.into(),
            AppError::NotificationError(e) => e.into(),
            AppError::CatalogError(e) => e.into(),
            AppError::QueryError(e) => e.into(),
            AppError::AuthError(_) => ApiError::Unauthorized(consts::MSG_INVALID_TOKEN.to_string()),
            AppError::TokenExpired => ApiError::Unauthorized(consts::MSG_TOKEN_EXPIRED.to_string()),
            AppError::UnknownError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}
