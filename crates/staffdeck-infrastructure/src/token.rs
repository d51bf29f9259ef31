//! Shared bearer-token slot.

use std::sync::Arc;
use tokio::sync::RwLock;

/// The bearer token shared between the auth store (writer) and the HTTP
/// client (reader).
///
/// The auth store publishes a token here after a successful login and
/// clears it on logout; every outgoing request reads the current value
/// when building its authorization header. Cloning shares the slot.
#[derive(Clone, Default)]
pub struct TokenCell {
    token: Arc<RwLock<Option<String>>>,
}

impl TokenCell {
    /// Creates an empty cell (no token, requests go out unauthenticated).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current token, if any.
    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Publishes a new token.
    pub async fn set(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    /// Clears the token; subsequent requests go out unauthenticated.
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}
