//! Paper Killer - Main Library
//!
//! Desktop client for the Paper Killer paper-management backend: upload
//! papers, tag and favorite them, run analyses, comment and share.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration, error types and the backend data model
//! - **`client`** - Session state, the authenticated HTTP wrapper, the route
//!   guard and one async function per backend operation
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use paper_killer::client::{ApiClient, FileTokenStore, RedirectQueue, SessionManager, SessionStore};
//! use paper_killer::shared::models::Credentials;
//! use paper_killer::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let session = SessionStore::restore(Arc::new(FileTokenStore::new(&config.token_path)));
//! let redirects = Arc::new(RedirectQueue::new());
//! let client = ApiClient::new(&config, session, redirects.clone())?;
//! let auth = SessionManager::new(client.clone(), &config);
//!
//! auth.login(&Credentials::new("ada@example.com", "Secret123!")).await?;
//! let dashboard = client.papers().dashboard().await;
//! # let _ = dashboard;
//! # Ok(())
//! # }
//! ```
//!
//! # Session handling
//!
//! - The token lives in a `tokio::sync::watch` channel and in a token file
//! - Every request made through [`client::ApiClient`] carries it as a bearer header
//! - A 401 clears both copies and queues a redirect to the login view

/// Shared types and configuration
pub mod shared;

/// Session, HTTP and resource access
pub mod client;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
