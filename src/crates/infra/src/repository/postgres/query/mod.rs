pub mod catalog;
pub mod comment;
pub mod notification;
pub mod rating;
