//! AES-256-GCM content encryption with base64 armor.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DocumentKey;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// AES-GCM nonce size in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// One encryption result: random nonce plus ciphertext with appended tag.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedData {
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    /// Armors as `base64(nonce || ciphertext)` for text-oriented
    /// transports. Lossless and order-preserving.
    pub fn to_base64(&self) -> String {
        let combined = [self.nonce.as_slice(), self.ciphertext.as_slice()].concat();
        BASE64.encode(combined)
    }

    /// Inverse of [`to_base64`](Self::to_base64).
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let decoded = BASE64
            .decode(encoded)
            .map_err(|e| CryptoError::Encoding(format!("base64 decode failed: {e}")))?;

        if decoded.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::Encoding(format!(
                "armored ciphertext too short: {} bytes",
                decoded.len()
            )));
        }

        let (nonce, ciphertext) = decoded.split_at(NONCE_SIZE);
        Ok(Self {
            nonce: nonce.to_vec(),
            ciphertext: ciphertext.to_vec(),
        })
    }
}

/// Encrypts document content under a symmetric key with a fresh nonce.
pub fn encrypt(key: &DocumentKey, plaintext: &[u8]) -> CryptoResult<EncryptedData> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("cipher init failed: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| CryptoError::Encryption("AES-GCM encryption failed".to_string()))?;

    Ok(EncryptedData {
        nonce: nonce_bytes.to_vec(),
        ciphertext,
    })
}

/// Decrypts document content, authenticating the ciphertext.
pub fn decrypt(key: &DocumentKey, data: &EncryptedData) -> CryptoResult<Vec<u8>> {
    if data.nonce.len() != NONCE_SIZE {
        return Err(CryptoError::Encoding(format!(
            "invalid nonce length: expected {NONCE_SIZE}, got {}",
            data.nonce.len()
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Decryption(format!("cipher init failed: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(&data.nonce), data.ciphertext.as_slice())
        .map_err(|_| CryptoError::Decryption("wrong key or tampered data".to_string()))
}
