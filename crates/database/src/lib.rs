pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod services;

pub use config::{ConfigError, DatabaseConfig};
pub use error::ServiceError;
