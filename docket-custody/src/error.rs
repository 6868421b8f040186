//! Error types for the custody core.

use docket_crypto::CryptoError;
use docket_store::StoreError;
use docket_types::DocumentStatus;
use thiserror::Error;

/// Errors surfaced by the lifecycle engine and key custodian.
///
/// Messages never carry key material; crypto failures arrive with the
/// fixed texts chosen in `docket-crypto`.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// A request field failed validation before any state was touched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced document or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The actor's role does not permit the attempted action.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// The document has already left `pending`; resolutions are final.
    #[error("invalid transition: document is already {from}")]
    InvalidTransition {
        /// Status the document held when the attempt was refused.
        from: DocumentStatus,
    },

    /// Key wrapping, unwrapping, or content encryption failed.
    #[error("crypto failure: {0}")]
    Crypto(#[from] CryptoError),

    /// The directory is in a state the custody rules refuse to honor.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<StoreError> for CustodyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(id) => CustodyError::NotFound(format!("user {id}")),
            StoreError::DocumentNotFound(id) => CustodyError::NotFound(format!("document {id}")),
            StoreError::UsernameTaken(name) => {
                CustodyError::Conflict(format!("username '{name}' is already taken"))
            }
            StoreError::ApproverExists => {
                CustodyError::Conflict("an active approver already exists".to_string())
            }
            StoreError::StatusConflict { found, .. } => {
                CustodyError::InvalidTransition { from: found }
            }
        }
    }
}

pub type CustodyResult<T> = Result<T, CustodyError>;
