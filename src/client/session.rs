//! Process-wide session state.
//!
//! [`SessionStore`] is created once at startup and cloned into every
//! component that needs it. All clones share one state. Writes go through
//! three paths only: login ([`SessionStore::establish`]), logout and the
//! 401 handler (both [`SessionStore::clear`]). Everything else reads.

use std::sync::Arc;

use tokio::sync::watch;

use crate::client::storage::TokenStore;
use crate::shared::error::StorageError;
use crate::shared::models::UserInfo;

/// Snapshot of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl Session {
    /// A non-empty token means authenticated. Whether the backend still
    /// accepts it is only discovered by the next 401.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Session>,
    storage: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Rehydrate from durable storage. A persisted token is trusted as-is.
    pub fn restore(storage: Arc<dyn TokenStore>) -> Self {
        let token = match storage.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted token, starting signed out");
                None
            }
        };
        if token.is_some() {
            tracing::info!("restored persisted session");
        }
        let (state, _) = watch::channel(Session { token, user: None });
        Self {
            inner: Arc::new(Inner { state, storage }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .state
            .borrow()
            .token
            .clone()
            .filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.inner.state.borrow().user.clone()
    }

    /// Change notifications for readers that want to react to login/logout.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Persist the token, then publish the new session. If persisting fails
    /// the current session is left as it was.
    pub(crate) fn establish(&self, token: String, user: Option<UserInfo>) -> Result<Session, StorageError> {
        self.inner.storage.save(&token)?;
        let session = Session {
            token: Some(token),
            user,
        };
        self.inner.state.send_replace(session.clone());
        Ok(session)
    }

    /// Drop the session in memory and on disk. Never fails; a storage error
    /// is logged and the in-memory session is cleared regardless.
    pub(crate) fn clear(&self) {
        if let Err(e) = self.inner.storage.clear() {
            tracing::warn!(error = %e, "failed to remove persisted token");
        }
        self.inner.state.send_replace(Session::default());
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::MemoryTokenStore;

    #[test]
    fn test_restore_without_token() {
        let store = SessionStore::restore(Arc::new(MemoryTokenStore::new()));
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_restore_trusts_persisted_token() {
        let store = SessionStore::restore(Arc::new(MemoryTokenStore::with_token("stale")));
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("stale"));
        assert!(store.user().is_none());
    }

    #[test]
    fn test_establish_persists_and_publishes() {
        let storage = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::restore(storage.clone());
        let reader = store.clone();

        store
            .establish("tok123".to_string(), Some(UserInfo::default()))
            .unwrap();

        assert_eq!(storage.load().unwrap().as_deref(), Some("tok123"));
        assert!(reader.is_authenticated());
        assert_eq!(reader.token().as_deref(), Some("tok123"));
    }

    #[test]
    fn test_clear_is_visible_to_all_clones() {
        let storage = Arc::new(MemoryTokenStore::with_token("tok"));
        let store = SessionStore::restore(storage.clone());
        let reader = store.clone();
        let mut updates = reader.subscribe();

        store.clear();

        assert!(!reader.is_authenticated());
        assert_eq!(storage.load().unwrap(), None);
        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), Session::default());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session {
            token: Some(String::new()),
            user: None,
        };
        assert!(!session.is_authenticated());
    }
}
