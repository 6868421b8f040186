//! Shared domain model for the document custody subsystem.
//!
//! Documents move through a one-way approval lifecycle (pending →
//! approved / rejected / correction) while their content stays encrypted
//! under a per-owner symmetric key. The types here are the vocabulary the
//! other docket crates speak: identifiers, roles, statuses, the document
//! and user records, notification payloads, and the tagged request shapes
//! accepted at the custody boundary.
//!
//! Key material itself never appears in this crate — `User` is safe to
//! serialize because the symmetric key lives behind the store boundary.

mod document;
mod ids;
mod notification;
mod requests;
mod user;

pub use document::{Document, DocumentStatus, DocumentSummary};
pub use ids::{DocumentId, NotificationId, UserId};
pub use notification::{Notification, NotificationIntent};
pub use requests::{
    DisclosureRequest, DocumentQuery, SubmitRequest, TransitionRequest, WrappedKey,
};
pub use user::{NewUser, Role, User};
