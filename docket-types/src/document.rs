//! Documents and their approval lifecycle status.

use crate::ids::{DocumentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of a document.
///
/// `Pending` is the only non-terminal status: once a document is
/// approved, rejected, or sent back for correction it never changes
/// again. Wire tokens are fixed lowercase (`pending`, `approved`,
/// `rejected`, `correction`) for compatibility with existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(rename = "correction")]
    CorrectionRequested,
}

impl DocumentStatus {
    /// The lowercase wire token for this status.
    pub fn as_token(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::CorrectionRequested => "correction",
        }
    }

    /// Returns true once the document can no longer change status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DocumentStatus::Pending)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

/// A submitted document under custody.
///
/// Created at submission with status `Pending`; mutated only by the
/// lifecycle engine; never deleted. The content itself is stored
/// elsewhere as ciphertext — `ciphertext_ref` is the opaque handle to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub owner_id: UserId,
    pub title: String,
    pub department: String,
    pub description: Option<String>,
    pub status: DocumentStatus,
    /// Mandatory at a correction-request transition, optional free text
    /// on approve/reject.
    pub remarks: Option<String>,
    pub ciphertext_ref: String,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub correction_requested_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Condensed view returned from lifecycle operations.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title.clone(),
            status: self.status,
            remarks: self.remarks.clone(),
        }
    }
}

/// The slice of a document reported back after a transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub owner_id: UserId,
    pub title: String,
    pub status: DocumentStatus,
    pub remarks: Option<String>,
}
