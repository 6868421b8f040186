//! Notification inbox — recorded intents awaiting a first view.

use chrono::Utc;
use docket_types::{Notification, NotificationIntent, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-recipient inbox of lifecycle notifications.
///
/// Entries start unseen; a recipient's client drains them with
/// [`unseen_for`](NotificationStore::unseen_for) and acknowledges with
/// [`mark_all_seen`](NotificationStore::mark_all_seen).
#[derive(Clone)]
pub struct NotificationStore {
    inbox: Arc<RwLock<HashMap<UserId, Vec<Notification>>>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self {
            inbox: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Persists an intent as an unseen inbox entry.
    pub async fn record(&self, intent: NotificationIntent) -> Notification {
        let notification = Notification::from_intent(intent, Utc::now());
        self.inbox
            .write()
            .await
            .entry(notification.recipient)
            .or_default()
            .push(notification.clone());
        notification
    }

    /// Unseen notifications for a recipient, newest first.
    pub async fn unseen_for(&self, recipient: UserId) -> Vec<Notification> {
        let inbox = self.inbox.read().await;
        let mut unseen: Vec<Notification> = inbox
            .get(&recipient)
            .map(|items| items.iter().filter(|n| !n.seen).cloned().collect())
            .unwrap_or_default();
        unseen.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        unseen
    }

    /// Marks everything in a recipient's inbox seen; returns how many
    /// entries changed.
    pub async fn mark_all_seen(&self, recipient: UserId) -> usize {
        let mut inbox = self.inbox.write().await;
        match inbox.get_mut(&recipient) {
            Some(items) => {
                let mut changed = 0;
                for item in items.iter_mut().filter(|n| !n.seen) {
                    item.seen = true;
                    changed += 1;
                }
                changed
            }
            None => 0,
        }
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}
