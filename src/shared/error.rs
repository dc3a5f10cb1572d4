//! Shared Error Types
//!
//! This module defines the error taxonomy used across the client library and
//! the desktop app.
//!
//! # Error Categories
//!
//! - `ValidationError` - form or upload checks that fail before any request
//! - `ApiError::Unauthorized` - the backend rejected the session token (401)
//! - `ApiError::Status` - any other non-2xx response with the backend detail
//! - `ApiError::Timeout` / `ApiError::Transport` - the request never completed
//! - `StorageError` - the persisted token could not be read or written
//!
//! # Usage
//!
//! ```rust
//! use paper_killer::shared::error::{ApiError, ValidationError};
//!
//! let error: ApiError = ValidationError::new("email", "Email is required").into();
//! assert_eq!(error.user_message(), "Email is required");
//! ```
use std::path::PathBuf;

use thiserror::Error;

use crate::shared::config::ConfigError;

/// A client-side check failed; the request was never sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure reading or writing the persisted session token.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token store lock poisoned")]
    Poisoned,
}

/// Every failure a backend call can surface to its caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The session token was rejected. The session has already been cleared
    /// and a redirect to login issued by the time callers see this.
    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },

    /// Non-2xx response other than an authenticated 401.
    #[error("Request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Map a reqwest failure onto the transport categories.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for the transient notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.message.clone(),
            Self::Unauthorized { .. } => "Your session has expired, please log in again".to_string(),
            Self::Status { detail, .. } => detail.clone(),
            Self::Timeout => "The server took too long to respond".to_string(),
            Self::Transport(_) => "Could not reach the server".to_string(),
            Self::Decode(_) => "The server sent an unexpected response".to_string(),
            Self::Storage(_) => "Could not save the session on this device".to_string(),
            Self::Config(err) => err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}
