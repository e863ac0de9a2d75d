use thiserror::Error;

pub mod dao;
pub mod get_catalog;
pub mod get_comments;
pub mod get_notifications;
pub mod get_rating;
pub mod rank_by_rating;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    DbError(String),
}
