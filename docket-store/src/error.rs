//! Store error types.

use docket_types::{DocumentId, DocumentStatus, UserId};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the backing stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("an active approver already exists")]
    ApproverExists,

    /// The conditional status update observed a non-pending document.
    /// Carries what was actually stored so callers can report the loss.
    #[error("document {id} is already {found}")]
    StatusConflict {
        id: DocumentId,
        found: DocumentStatus,
    },
}
