//! Seal, open, and key-recovery operations over the crypto provider.

use docket_crypto::{CryptoError, CryptoProvider, DocumentKey, EphemeralKeyPair, OaepGcmProvider};
use docket_types::WrappedKey;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from requester-side envelope operations.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The underlying cryptographic operation failed.
    #[error("crypto failure: {0}")]
    Crypto(#[from] CryptoError),

    /// A background task was cancelled or panicked.
    #[error("background task failed: {0}")]
    Task(String),
}

pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Client-side counterpart of the key custodian.
///
/// Holds no state beyond the crypto provider; one envelope can serve any
/// number of documents and disclosure exchanges.
#[derive(Clone)]
pub struct DocumentCipherEnvelope {
    provider: Arc<dyn CryptoProvider>,
}

impl DocumentCipherEnvelope {
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self { provider }
    }

    /// Envelope over the default RSA-OAEP + AES-GCM provider.
    pub fn with_default_provider() -> Self {
        Self::new(Arc::new(OaepGcmProvider))
    }

    /// Generates a single-use keypair for one disclosure exchange.
    ///
    /// RSA-2048 generation is CPU-bound, so it runs on a blocking thread;
    /// other tasks on the runtime are not stalled.
    pub async fn generate_keypair(&self) -> EnvelopeResult<EphemeralKeyPair> {
        let provider = self.provider.clone();
        let pair = tokio::task::spawn_blocking(move || provider.generate_keypair())
            .await
            .map_err(|e| EnvelopeError::Task(e.to_string()))??;
        debug!("generated single-use disclosure keypair");
        Ok(pair)
    }

    /// Recovers a disclosed document key with the retained private half.
    pub fn recover_key(
        &self,
        grant: &WrappedKey,
        pair: &EphemeralKeyPair,
    ) -> EnvelopeResult<DocumentKey> {
        let key = self.provider.unwrap_key(&grant.wrapped_key_base64, pair)?;
        debug!("recovered document key from disclosure grant");
        Ok(key)
    }

    /// Encrypts document content and armors it for a text transport.
    pub fn seal_document(&self, key: &DocumentKey, plaintext: &[u8]) -> EnvelopeResult<String> {
        let armored = self.provider.encrypt(key, plaintext)?;
        debug!(plaintext_bytes = plaintext.len(), "sealed document content");
        Ok(armored)
    }

    /// Byte-for-byte inverse of [`seal_document`](Self::seal_document).
    pub fn open_document(&self, key: &DocumentKey, armored: &str) -> EnvelopeResult<Vec<u8>> {
        let plaintext = self.provider.decrypt(key, armored)?;
        debug!(plaintext_bytes = plaintext.len(), "opened document content");
        Ok(plaintext)
    }
}

impl Default for DocumentCipherEnvelope {
    fn default() -> Self {
        Self::with_default_provider()
    }
}

impl fmt::Debug for DocumentCipherEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCipherEnvelope").finish()
    }
}
