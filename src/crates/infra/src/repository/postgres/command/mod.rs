pub mod catalog;
pub mod comment;
pub mod db_data;
pub mod notification;
pub mod rating;
pub mod user;
