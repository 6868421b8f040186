//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors from key wrapping, unwrapping, and content encryption.
///
/// Messages never carry key material; unwrap and decrypt failures use
/// fixed text rather than echoing library errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("key wrap failed: {0}")]
    Wrap(String),

    #[error("key unwrap failed: {0}")]
    Unwrap(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("invalid encoding: {0}")]
    Encoding(String),

    #[error("invalid key length: expected {expected}, actual {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}
