//! egui Native Desktop App Module
//!
//! The desktop front end. It owns no session logic of its own: every call
//! goes through [`crate::client`], and the views only read [`AppState`].
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs    - Module exports and documentation
//! ├── main.rs   - Main application entry point (binary)
//! ├── state/    - AppState, per-view state and user actions
//! ├── tasks.rs  - Background task results, tagged by view generation
//! ├── views/    - One module per screen
//! └── theme/    - Colors and frame styles
//! ```

pub mod state;
pub mod tasks;
pub mod theme;
pub mod views;

pub use state::{AppState, StartupError};
