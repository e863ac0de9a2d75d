pub mod auth;
pub mod config;
pub use config::{AppConfigImpl, CatalogConfig, DatabaseConfig, ServerConfig};

pub mod id_generator;

pub mod repository;

pub mod seed;
