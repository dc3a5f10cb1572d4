//! Client core: session state, the HTTP wrapper, navigation gating and the
//! resource-access functions. Nothing here depends on the UI.

pub mod api;
pub mod auth;
pub mod http;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod validation;

pub use auth::SessionManager;
pub use http::{ApiClient, ApiPath};
pub use navigation::{GuardDecision, Guarded, Navigator, RedirectQueue, Route, RouteGuard};
pub use session::{Session, SessionStore};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
