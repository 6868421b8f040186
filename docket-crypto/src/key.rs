//! The per-user symmetric document key.

use crate::error::{CryptoError, CryptoResult};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Document key size in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// A 256-bit symmetric key protecting one user's document content.
///
/// Generated once at account creation and owned by the user directory;
/// it leaves the process only wrapped under a requester's ephemeral
/// public key. Zeroized on drop, redacted in debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DocumentKey {
    bytes: [u8; KEY_SIZE],
}

impl DocumentKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Reconstructs a key from a slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut fixed = [0u8; KEY_SIZE];
        fixed.copy_from_slice(bytes);
        Ok(Self { bytes: fixed })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocumentKey([REDACTED])")
    }
}
