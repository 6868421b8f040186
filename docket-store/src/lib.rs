//! In-memory backing stores for the document custody subsystem.
//!
//! These are the collaborators the custody core is specified against: a
//! user directory that owns the per-user symmetric keys, a document store
//! whose status update is compare-and-swap, a session directory mapping
//! users to device tokens, and a notification inbox.
//!
//! All stores are cheaply cloneable handles over shared state
//! (`Arc<RwLock<...>>`) and safe to use from concurrent tasks. The only
//! mutual exclusion the subsystem needs is the document-status swap; key
//! reads are read-many/write-once-at-creation and take the read lock only.

mod documents;
mod error;
mod notifications;
mod sessions;
mod users;

pub use documents::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use notifications::NotificationStore;
pub use sessions::SessionDirectory;
pub use users::UserDirectory;
