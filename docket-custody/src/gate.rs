//! Role-based access gate.
//!
//! The gate is a pure table from `(role, action)` to allow/deny. It holds
//! no state and performs no I/O, so every caller gets the same answer and
//! a denial can never leave partial work behind. Callers that need more
//! than the table (ownership checks, directory lookups) layer those on
//! top; the gate stays the single place the role matrix is written down.

use crate::error::{CustodyError, CustodyResult};
use docket_types::Role;
use std::fmt;

/// Action a caller may attempt against the custody core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    /// Submit a new encrypted document for review.
    Submit,
    /// Resolve a pending document (approve, reject, request correction).
    Transition,
    /// Request one's own symmetric key, wrapped.
    DiscloseOwn,
    /// Request another user's symmetric key for a specific document.
    DiscloseFor,
    /// List documents filtered by an arbitrary creator.
    ListByCreator,
}

impl fmt::Display for DocumentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentAction::Submit => write!(f, "submit"),
            DocumentAction::Transition => write!(f, "transition"),
            DocumentAction::DiscloseOwn => write!(f, "disclose_own"),
            DocumentAction::DiscloseFor => write!(f, "disclose_for"),
            DocumentAction::ListByCreator => write!(f, "list_by_creator"),
        }
    }
}

/// Pure role table consulted by the lifecycle engine and key custodian.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    /// Returns whether `role` may perform `action`.
    ///
    /// Assistants author documents, so only they submit; approvers and
    /// admins review, so only they transition, disclose on behalf of
    /// owners, or browse by creator. Every role may recover its own key.
    pub fn allows(&self, role: Role, action: DocumentAction) -> bool {
        match action {
            DocumentAction::Submit => role == Role::Assistant,
            DocumentAction::Transition => matches!(role, Role::Approver | Role::Admin),
            DocumentAction::DiscloseOwn => true,
            DocumentAction::DiscloseFor => matches!(role, Role::Approver | Role::Admin),
            DocumentAction::ListByCreator => matches!(role, Role::Approver | Role::Admin),
        }
    }

    /// Like [`allows`](Self::allows), but a denial becomes a
    /// [`CustodyError::Authorization`].
    pub fn authorize(&self, role: Role, action: DocumentAction) -> CustodyResult<()> {
        if self.allows(role, action) {
            Ok(())
        } else {
            Err(CustodyError::Authorization(format!(
                "role '{role}' is not permitted to perform '{action}'"
            )))
        }
    }
}
