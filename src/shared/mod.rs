//! Types shared by the client core and the desktop app: configuration,
//! error types and the backend's data model.

/// Application configuration
pub mod config;

/// Error types
pub mod error;

/// Backend payloads
pub mod models;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, LoginFormat};
pub use error::{ApiError, StorageError, ValidationError};
