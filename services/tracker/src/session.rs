//! Session management for logged-in users
//!
//! Sessions are process-local: an opaque token maps to a user id for as
//! long as the process runs. Logout removes the token; a restart clears
//! every session. There is no server-side expiry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// In-memory session store shared across handlers
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, i64>>>,
}

impl SessionStore {
    /// Create a new, empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session for a user and return its opaque token
    pub async fn create_session(&self, user_id: i64) -> String {
        info!("Creating session for user: {}", user_id);

        let token = Uuid::new_v4().simple().to_string();
        self.sessions.write().await.insert(token.clone(), user_id);
        token
    }

    /// Resolve a token to the user id it was issued for
    pub async fn resolve_session(&self, token: &str) -> Option<i64> {
        self.sessions.read().await.get(token).copied()
    }

    /// Delete a session, returning whether it existed
    pub async fn delete_session(&self, token: &str) -> bool {
        info!("Deleting session");

        self.sessions.write().await.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_resolve_session() {
        let store = SessionStore::new();
        let token = store.create_session(42).await;

        assert_eq!(store.resolve_session(&token).await, Some(42));
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_login() {
        let store = SessionStore::new();
        let first = store.create_session(1).await;
        let second = store.create_session(1).await;

        assert_ne!(first, second);
        assert_eq!(store.resolve_session(&first).await, Some(1));
        assert_eq!(store.resolve_session(&second).await, Some(1));
    }

    #[tokio::test]
    async fn test_unknown_token_does_not_resolve() {
        let store = SessionStore::new();
        assert_eq!(store.resolve_session("no-such-token").await, None);
    }

    #[tokio::test]
    async fn test_delete_session_clears_token() {
        let store = SessionStore::new();
        let token = store.create_session(7).await;

        assert!(store.delete_session(&token).await);
        assert_eq!(store.resolve_session(&token).await, None);

        // A second delete of the same token is a no-op
        assert!(!store.delete_session(&token).await);
    }
}
