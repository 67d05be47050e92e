//! The signed-in session, passed explicitly to whatever needs the token.

use secrecy::{ExposeSecret, SecretString};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Storage key the token is persisted under.
pub const SESSION_TOKEN_KEY: &str = "token";

/// Persistence for the session token. The browser implementation writes to
/// local storage; writes are best effort.
pub trait TokenStore {
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str);

    fn clear(&self);
}

/// Keeps the token for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Handle to the current session. Clones share the same store.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Rc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    pub fn token(&self) -> Option<SecretString> {
        self.store.load().map(SecretString::from)
    }

    pub fn is_active(&self) -> bool {
        self.store.load().is_some()
    }

    /// Persist a freshly issued token.
    pub fn begin(&self, token: &SecretString) {
        self.store.save(token.expose_secret());
        tracing::info!("Session started");
    }

    /// Forget the token. Safe to call when no session is active.
    pub fn end(&self) {
        self.store.clear();
        tracing::info!("Session ended");
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_end() {
        let session = Session::in_memory();
        assert!(!session.is_active());

        session.begin(&SecretString::from("abc123"));
        assert_eq!(
            session.token().map(|t| t.expose_secret().to_string()),
            Some("abc123".to_string())
        );

        session.end();
        assert!(session.token().is_none());
        session.end();
    }

    #[test]
    fn clones_share_the_store() {
        let session = Session::in_memory();
        let other = session.clone();

        session.begin(&SecretString::from("abc123"));

        assert!(other.is_active());
        assert_eq!(session, other);
        assert_ne!(session, Session::in_memory());
    }
}
