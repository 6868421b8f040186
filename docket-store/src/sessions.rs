//! Session directory — active device tokens per user.

use docket_types::UserId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Tracks which device tokens are active for each user.
///
/// The lifecycle engine fans one notification out per token returned by
/// [`active_device_tokens`](SessionDirectory::active_device_tokens).
#[derive(Clone)]
pub struct SessionDirectory {
    sessions: Arc<RwLock<HashMap<UserId, Vec<String>>>>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a device token for a user. Duplicate registrations of
    /// the same token are collapsed.
    pub async fn register(&self, user: UserId, device_token: impl Into<String>) {
        let token = device_token.into();
        let mut sessions = self.sessions.write().await;
        let tokens = sessions.entry(user).or_default();
        if !tokens.contains(&token) {
            tokens.push(token);
            debug!(user = %user, sessions = tokens.len(), "registered device session");
        }
    }

    /// Drops one device token. Returns `true` if it was present.
    pub async fn remove(&self, user: UserId, device_token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&user) {
            Some(tokens) => {
                let before = tokens.len();
                tokens.retain(|t| t != device_token);
                tokens.len() != before
            }
            None => false,
        }
    }

    /// Device tokens for every active session of a user. May be empty.
    pub async fn active_device_tokens(&self, user: UserId) -> Vec<String> {
        self.sessions
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for SessionDirectory {
    fn default() -> Self {
        Self::new()
    }
}
