use domain::catalog::CatalogError;
use domain::comment::CommentError;
use domain::notification::NotificationError;
use domain::rating::RatingError;
use domain::user::UserError;

use crate::query::QueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("User error: {0}")]
    UserError(#[from] UserError),
    #[error("Rating error: {0}")]
    RatingError(#[from] RatingError),
    #[error("Comment error: {0}")]
    CommentError(#[from] CommentError),
    #[error("Notification error: {0}")]
    NotificationError(#[from] NotificationError),
    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),
    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("token expired")]
    TokenExpired,

    #[error("Unknown error: {0}")]
    UnknownError(String),
}
