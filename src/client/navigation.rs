//! Routes, the login redirect seam, and the route guard.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::client::session::SessionStore;
use crate::shared::models::RecordId;

/// Every view the app can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Papers,
    NewPaper,
    Upload,
    PaperDetail(RecordId),
    EditPaper(RecordId),
    PaperAnalysis(RecordId),
    Profile,
    Files,
    /// The ICLR 2025 collection; browsable without an account.
    Conference,
    WritePaper,
}

impl Route {
    /// Whether the route needs an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Home | Route::Login | Route::Register | Route::Conference | Route::WritePaper
        )
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Papers => "/papers".to_string(),
            Route::NewPaper => "/papers/new".to_string(),
            Route::Upload => "/papers/upload".to_string(),
            Route::PaperDetail(id) => format!("/papers/{id}"),
            Route::EditPaper(id) => format!("/papers/{id}/edit"),
            Route::PaperAnalysis(id) => format!("/papers/{id}/analysis"),
            Route::Profile => "/profile".to_string(),
            Route::Files => "/files".to_string(),
            Route::Conference => "/iclr2025".to_string(),
            Route::WritePaper => "/write-paper".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["papers"] => Route::Papers,
            ["papers", "new"] => Route::NewPaper,
            ["papers", "upload"] => Route::Upload,
            ["papers", id] => Route::PaperDetail(RecordId::from(*id)),
            ["papers", id, "edit"] => Route::EditPaper(RecordId::from(*id)),
            ["papers", id, "analysis"] => Route::PaperAnalysis(RecordId::from(*id)),
            ["profile"] => Route::Profile,
            ["files"] => Route::Files,
            ["iclr2025"] => Route::Conference,
            ["write-paper"] => Route::WritePaper,
            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives the forced redirect issued when the backend rejects the session.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Navigator used by the app: records the redirect for the UI to pick up on
/// its next frame. Repeated redirects collapse into one pending entry.
#[derive(Debug, Default)]
pub struct RedirectQueue {
    pending: Mutex<Option<Route>>,
    issued: AtomicU64,
}

impl RedirectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending redirect, if any.
    pub fn take(&self) -> Option<Route> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Total redirects issued since startup.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

impl Navigator for RedirectQueue {
    fn redirect_to_login(&self) {
        self.issued.fetch_add(1, Ordering::SeqCst);
        *self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Route::Login);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

/// Outcome of guarding an arbitrary view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    View(V),
    RedirectToLogin,
}

/// Navigation gate for protected views. Backend calls are authorized
/// separately; this only decides what to render.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn resolve(&self, requested: Route) -> GuardDecision {
        if requested.is_protected() && !self.session.is_authenticated() {
            tracing::debug!(route = %requested, "unauthenticated, redirecting to login");
            GuardDecision::Redirect(Route::Login)
        } else {
            GuardDecision::Render(requested)
        }
    }

    /// Wrap any protected view.
    pub fn protect<V>(&self, view: V) -> Guarded<V> {
        if self.session.is_authenticated() {
            Guarded::View(view)
        } else {
            Guarded::RedirectToLogin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::MemoryTokenStore;
    use std::sync::Arc;

    fn guard_with(token: Option<&str>) -> RouteGuard {
        let storage = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        };
        RouteGuard::new(SessionStore::restore(Arc::new(storage)))
    }

    #[test]
    fn test_route_paths_roundtrip() {
        let routes = [
            Route::Home,
            Route::Login,
            Route::Dashboard,
            Route::NewPaper,
            Route::Upload,
            Route::PaperDetail(RecordId::Number(5)),
            Route::EditPaper(RecordId::Text("p-9".to_string())),
            Route::PaperAnalysis(RecordId::Number(5)),
            Route::Profile,
            Route::Files,
            Route::Conference,
            Route::WritePaper,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route.clone()), "{route}");
        }
        assert_eq!(Route::parse("/nowhere/at/all/x"), None);
    }

    #[test]
    fn test_public_routes() {
        assert!(!Route::Home.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(Route::Papers.is_protected());
        assert!(Route::PaperDetail(RecordId::Number(1)).is_protected());
        assert!(Route::Files.is_protected());
        assert!(!Route::Conference.is_protected());
        assert!(!Route::WritePaper.is_protected());
    }

    #[test]
    fn test_guard_redirects_without_token() {
        let guard = guard_with(None);
        assert_eq!(guard.resolve(Route::Dashboard), GuardDecision::Redirect(Route::Login));
        assert_eq!(guard.resolve(Route::Register), GuardDecision::Render(Route::Register));
        assert_eq!(guard.resolve(Route::Files), GuardDecision::Redirect(Route::Login));
        assert_eq!(guard.resolve(Route::Conference), GuardDecision::Render(Route::Conference));
        assert_eq!(guard.protect("papers view"), Guarded::RedirectToLogin);
    }

    #[test]
    fn test_guard_renders_with_token() {
        let guard = guard_with(Some("tok"));
        assert_eq!(guard.resolve(Route::Papers), GuardDecision::Render(Route::Papers));
        assert_eq!(guard.protect(42), Guarded::View(42));
    }

    #[test]
    fn test_redirect_queue_counts_every_redirect() {
        let queue = RedirectQueue::new();
        queue.redirect_to_login();
        queue.redirect_to_login();
        assert_eq!(queue.issued(), 2);
        assert_eq!(queue.take(), Some(Route::Login));
        assert_eq!(queue.take(), None);
    }
}
