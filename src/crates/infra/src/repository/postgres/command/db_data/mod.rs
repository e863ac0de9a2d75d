pub mod album;
pub mod comment;
pub mod comment_like;
pub mod notification;
pub mod rating;
pub mod single;
pub mod song;
pub mod user;
