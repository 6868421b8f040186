//! Document custody core: approval lifecycle fused with key disclosure.
//!
//! Two components share one security boundary:
//!
//! - [`LifecycleEngine`] runs the document state machine. A document is
//!   submitted `pending` and resolved exactly once — approved, rejected,
//!   or sent back for correction — by a reviewer. The status swap is
//!   conditional, so concurrent resolutions have exactly one winner, and
//!   each accepted change fans a best-effort notification out to the
//!   owner's active sessions.
//! - [`KeyCustodian`] brokers disclosure of per-user symmetric document
//!   keys. Keys leave the store only wrapped under the requester's
//!   single-use RSA public key; proxy disclosure (a reviewer asking for a
//!   document owner's key) re-checks the requester's role on its own
//!   rather than trusting the gate upstream.
//!
//! [`AccessGate`] is the pure role table both consult; every denial is a
//! [`CustodyError::Authorization`] with no side effects.

mod config;
mod custodian;
mod error;
mod gate;
mod lifecycle;
mod relay;

pub use config::CustodyConfig;
pub use custodian::KeyCustodian;
pub use error::{CustodyError, CustodyResult};
pub use gate::{AccessGate, DocumentAction};
pub use lifecycle::LifecycleEngine;
pub use relay::{LogOnlyRelay, NotificationRelay, RelayError};
