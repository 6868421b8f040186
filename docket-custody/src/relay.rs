//! Notification delivery seam.
//!
//! The lifecycle engine records every notification it intends to send and
//! then hands delivery to a [`NotificationRelay`]. Delivery is strictly
//! best-effort: a relay failure is logged and dropped, never surfaced to
//! the caller and never allowed to roll back a status change that already
//! happened.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Errors a relay may report for a single delivery attempt.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The push service rejected or failed the delivery.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// The device token is no longer registered with the push service.
    #[error("unknown device: {0}")]
    UnknownDevice(String),
}

/// Delivers one notification to one device.
///
/// Implementations wrap whatever push transport the deployment uses.
/// [`LogOnlyRelay`] is the default and simply traces the payload.
#[async_trait]
pub trait NotificationRelay: Send + Sync {
    /// Attempts delivery to a single device token.
    async fn send(&self, device_token: &str, title: &str, body: &str) -> Result<(), RelayError>;
}

/// Relay that logs instead of delivering. Suitable for tests and for
/// deployments without a push transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyRelay;

#[async_trait]
impl NotificationRelay for LogOnlyRelay {
    async fn send(&self, device_token: &str, title: &str, body: &str) -> Result<(), RelayError> {
        debug!(device_token, title, body, "notification (log only)");
        Ok(())
    }
}
