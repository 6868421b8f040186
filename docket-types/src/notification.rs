//! Notification payloads emitted by the lifecycle engine.

use crate::document::DocumentStatus;
use crate::ids::{NotificationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the lifecycle engine hands to the notification side channel after
/// an accepted submission or transition.
///
/// Delivery is best-effort: the intent is recorded and fanned out to the
/// recipient's active sessions, and failures never affect the operation
/// that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub recipient: UserId,
    pub title: String,
    pub body: String,
    /// The document status that triggered the notification.
    pub kind: DocumentStatus,
}

/// A notification persisted to the recipient's inbox.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub title: String,
    pub body: String,
    pub kind: DocumentStatus,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Builds an unseen inbox entry from an intent.
    pub fn from_intent(intent: NotificationIntent, at: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::new(),
            recipient: intent.recipient,
            title: intent.title,
            body: intent.body,
            kind: intent.kind,
            seen: false,
            created_at: at,
        }
    }
}
