pub mod catalog;
pub mod comment;
pub mod notification;
pub mod pagination;
pub mod rating;
pub mod shared;
pub mod user;
