//! Requester-side envelope operations.
//!
//! The custody core never sees plaintext: content is sealed by the party
//! that holds the document key and opened the same way. This crate is the
//! counterpart the requesting side runs — generate a single-use keypair,
//! recover a disclosed key, then seal or open document content with it.
//!
//! Keypair generation is the one CPU-heavy step, so it is pushed onto a
//! blocking thread instead of stalling the async runtime.

mod envelope;

pub use envelope::{DocumentCipherEnvelope, EnvelopeError, EnvelopeResult};
