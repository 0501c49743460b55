//! Session credential holder
//!
//! Holds the opaque session token obtained at login. The token is shared by
//! every clone of the client and attached to every request; it is never
//! refreshed automatically.

use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct SessionCredential {
    token: Arc<RwLock<String>>,
}

impl SessionCredential {
    /// Current token, possibly empty
    pub async fn current(&self) -> String {
        self.token.read().await.clone()
    }

    /// Replace the token. Callers must do this at a quiescent point.
    pub async fn set(&self, token: impl Into<String>) {
        let mut guard = self.token.write().await;
        *guard = token.into();
    }

    pub async fn is_empty(&self) -> bool {
        self.token.read().await.is_empty()
    }
}

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionCredential(****)")
    }
}

/// Session tokens issued by the API are GUIDs
pub fn is_guid(token: &str) -> bool {
    uuid::Uuid::parse_str(token).is_ok()
}
