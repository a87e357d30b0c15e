//! Session token storage
//!
//! The stored token is the only shared mutable resource in the client. Each
//! request takes a snapshot of it at dispatch time; a logout happening
//! mid-request cannot inject a missing token into a request that is already
//! in flight, and a new request started without a token fails fast locally
//! instead of being sent.

use std::sync::{Arc, RwLock};

use shared::models::{AuthResponse, User};

use crate::error::{AppError, AppResult};

/// An authenticated session: bearer token plus the user profile.
///
/// No expiry check is performed client-side; an expired token surfaces as a
/// rejected request.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Thread-safe holder for the current session
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the session returned by login/register
    pub fn set(&self, auth: AuthResponse) {
        let session = Session {
            token: auth.token,
            user: auth.user,
        };
        *self.inner.write().expect("session lock poisoned") = Some(session);
    }

    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.user.clone())
    }

    /// Snapshot the token for one request. Fails fast with an
    /// authentication error when no session is stored.
    pub fn token_snapshot(&self) -> AppResult<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(AppError::AuthTokenMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthResponse {
        AuthResponse {
            token: "tok-1".to_string(),
            user: User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_token_snapshot_requires_session() {
        let store = SessionStore::new();
        assert!(matches!(
            store.token_snapshot(),
            Err(AppError::AuthTokenMissing)
        ));

        store.set(auth());
        assert_eq!(store.token_snapshot().unwrap(), "tok-1");
    }

    #[test]
    fn test_logout_does_not_affect_taken_snapshot() {
        let store = SessionStore::new();
        store.set(auth());
        let snapshot = store.token_snapshot().unwrap();

        store.clear();
        // The in-flight request keeps the token it captured
        assert_eq!(snapshot, "tok-1");
        // But a new request fails fast
        assert!(store.token_snapshot().is_err());
    }
}
