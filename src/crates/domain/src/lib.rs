pub mod catalog;
pub mod comment;
pub mod notification;
pub mod rating;
pub mod user;
pub mod value;
