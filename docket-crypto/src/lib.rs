//! Cryptographic primitives for the document custody subsystem.
//!
//! Implements the hybrid envelope scheme the disclosure protocol relies on:
//! - AES-256-GCM for document content, armored as base64 for text
//!   transports
//! - RSA-OAEP with SHA-256 for wrapping a per-user symmetric key under a
//!   requester's single-use RSA-2048 keypair
//! - Zeroizing key types that never appear in debug output
//!
//! # Architecture
//!
//! Every user owns one 256-bit document key, generated once at account
//! creation. Content is encrypted under that key before upload. To read,
//! a party generates an [`EphemeralKeyPair`], sends its public half (SPKI
//! PEM) to the custodian, and receives the document key wrapped — the key
//! crosses the process boundary only inside RSA-OAEP ciphertext.
//!
//! Call sites outside this crate go through the [`CryptoProvider`] seam so
//! the cipher choices stay swappable and no caller handles raw key bytes.

mod cipher;
mod error;
mod key;
mod provider;
mod wrap;

pub use cipher::{decrypt, encrypt, EncryptedData, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{DocumentKey, KEY_SIZE};
pub use provider::{CryptoProvider, OaepGcmProvider};
pub use wrap::{unwrap_key, wrap_key, EphemeralKeyPair, RSA_KEY_BITS};
