//! RSA-OAEP key wrapping for the disclosure protocol.
//!
//! The requesting party generates an [`EphemeralKeyPair`] and sends its
//! public half as SPKI PEM; the custodian wraps the document key under it
//! and returns base64 ciphertext. The private half never leaves the
//! requester and the pair is discarded after one exchange.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DocumentKey;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::fmt;
use zeroize::Zeroize;

/// RSA modulus size for ephemeral keypairs.
pub const RSA_KEY_BITS: usize = 2048;

/// Single-exchange RSA keypair generated by the requesting party.
///
/// The private key zeroizes on drop (via the `rsa` crate); only the PEM
/// public half is meant to travel.
pub struct EphemeralKeyPair {
    private_key: Box<RsaPrivateKey>,
    public_key_pem: String,
}

impl EphemeralKeyPair {
    /// Generates a fresh RSA-2048 keypair.
    ///
    /// CPU-bound; callers on an async runtime should run this on a
    /// blocking thread (see `docket-client`).
    pub fn generate() -> CryptoResult<Self> {
        let private_key = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::KeyGeneration(format!("RSA keypair generation: {e}")))?;
        let public_key = RsaPublicKey::from(&private_key);
        let public_key_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGeneration(format!("public key PEM encoding: {e}")))?;

        Ok(Self {
            private_key: Box::new(private_key),
            public_key_pem,
        })
    }

    /// The SPKI PEM encoding of the public half.
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }
}

impl fmt::Debug for EphemeralKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralKeyPair")
            .field("private_key", &"[REDACTED]")
            .field("public_key_pem", &self.public_key_pem)
            .finish()
    }
}

/// Wraps a document key under a requester's public key.
///
/// RSA-OAEP with SHA-256, base64-encoded output. The same key wrapped
/// twice yields different ciphertexts (OAEP is randomized).
pub fn wrap_key(key: &DocumentKey, public_key_pem: &str) -> CryptoResult<String> {
    let public_key = RsaPublicKey::from_public_key_pem(public_key_pem)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;

    let wrapped = public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), key.as_bytes())
        .map_err(|e| CryptoError::Wrap(format!("RSA-OAEP encryption: {e}")))?;

    Ok(BASE64.encode(wrapped))
}

/// Unwraps a disclosed key with the retained private half.
pub fn unwrap_key(wrapped_key_base64: &str, pair: &EphemeralKeyPair) -> CryptoResult<DocumentKey> {
    let ciphertext = BASE64
        .decode(wrapped_key_base64)
        .map_err(|e| CryptoError::Encoding(format!("base64 decode failed: {e}")))?;

    let mut plaintext = pair
        .private_key
        .decrypt(Oaep::new::<Sha256>(), &ciphertext)
        .map_err(|_| CryptoError::Unwrap("wrong key or corrupted ciphertext".to_string()))?;

    let key = DocumentKey::from_slice(&plaintext);
    plaintext.zeroize();
    key
}
