//! Capability seam over the crate's primitives.

use crate::cipher::{self, EncryptedData};
use crate::error::CryptoResult;
use crate::key::DocumentKey;
use crate::wrap::{self, EphemeralKeyPair};

/// Cryptographic capability interface for the custody subsystem.
///
/// The custodian and client go through this seam so the RSA-OAEP and
/// AES-GCM choices stay swappable and no call site manipulates raw key
/// bytes directly.
pub trait CryptoProvider: Send + Sync {
    /// Generates a single-exchange keypair for a disclosure request.
    fn generate_keypair(&self) -> CryptoResult<EphemeralKeyPair>;

    /// Wraps a symmetric key under a PEM-encoded public key; returns
    /// base64 ciphertext.
    fn wrap_key(&self, key: &DocumentKey, public_key_pem: &str) -> CryptoResult<String>;

    /// Recovers a symmetric key from base64 wrap ciphertext with the
    /// retained private half.
    fn unwrap_key(
        &self,
        wrapped_key_base64: &str,
        pair: &EphemeralKeyPair,
    ) -> CryptoResult<DocumentKey>;

    /// Encrypts content and armors it for a text transport.
    fn encrypt(&self, key: &DocumentKey, plaintext: &[u8]) -> CryptoResult<String>;

    /// Byte-for-byte inverse of [`encrypt`](Self::encrypt).
    fn decrypt(&self, key: &DocumentKey, armored: &str) -> CryptoResult<Vec<u8>>;
}

/// Default provider: RSA-OAEP/SHA-256 wrapping, AES-256-GCM content
/// encryption.
#[derive(Clone, Copy, Debug, Default)]
pub struct OaepGcmProvider;

impl CryptoProvider for OaepGcmProvider {
    fn generate_keypair(&self) -> CryptoResult<EphemeralKeyPair> {
        EphemeralKeyPair::generate()
    }

    fn wrap_key(&self, key: &DocumentKey, public_key_pem: &str) -> CryptoResult<String> {
        wrap::wrap_key(key, public_key_pem)
    }

    fn unwrap_key(
        &self,
        wrapped_key_base64: &str,
        pair: &EphemeralKeyPair,
    ) -> CryptoResult<DocumentKey> {
        wrap::unwrap_key(wrapped_key_base64, pair)
    }

    fn encrypt(&self, key: &DocumentKey, plaintext: &[u8]) -> CryptoResult<String> {
        Ok(cipher::encrypt(key, plaintext)?.to_base64())
    }

    fn decrypt(&self, key: &DocumentKey, armored: &str) -> CryptoResult<Vec<u8>> {
        let data = EncryptedData::from_base64(armored)?;
        cipher::decrypt(key, &data)
    }
}
