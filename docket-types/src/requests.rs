//! Tagged request and response payloads for the custody boundary.
//!
//! Each operation accepts one typed shape, validated before it reaches
//! the lifecycle engine or key custodian.

use crate::document::DocumentStatus;
use crate::ids::{DocumentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to submit a new document for review.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub title: String,
    pub department: String,
    pub description: Option<String>,
    /// Opaque handle to the already-uploaded ciphertext.
    pub ciphertext_ref: String,
}

/// Request to move a document out of `Pending`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub document_id: DocumentId,
    pub target: DocumentStatus,
    /// Required when `target` is a correction request, optional otherwise.
    pub remarks: Option<String>,
}

/// Request for a wrapped symmetric key.
///
/// `document_id` present means proxy disclosure (a reviewer asking for a
/// document owner's key); absent means the requester wants their own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisclosureRequest {
    pub public_key_pem: String,
    pub document_id: Option<DocumentId>,
}

impl DisclosureRequest {
    /// Disclosure of the requester's own key.
    pub fn own(public_key_pem: impl Into<String>) -> Self {
        Self {
            public_key_pem: public_key_pem.into(),
            document_id: None,
        }
    }

    /// Proxy disclosure of a document owner's key.
    pub fn for_document(public_key_pem: impl Into<String>, document_id: DocumentId) -> Self {
        Self {
            public_key_pem: public_key_pem.into(),
            document_id: Some(document_id),
        }
    }
}

/// One disclosure result: the symmetric key wrapped under the requester's
/// ephemeral public key (RSA-OAEP/SHA-256), base64-encoded.
///
/// Consumed exactly once by the requester's unwrap step; the field name is
/// fixed for wire compatibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedKey {
    pub wrapped_key_base64: String,
}

/// Filters for listing documents.
///
/// At least one status is required; the remaining filters narrow the
/// result. Assistants are always limited to their own documents
/// regardless of `created_by`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DocumentQuery {
    pub statuses: Vec<DocumentStatus>,
    pub department: Option<String>,
    pub created_by: Option<UserId>,
    pub submitted_after: Option<DateTime<Utc>>,
    pub submitted_before: Option<DateTime<Utc>>,
}

impl DocumentQuery {
    pub fn with_statuses(statuses: Vec<DocumentStatus>) -> Self {
        Self {
            statuses,
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_creator(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }

    /// Restricts to documents submitted in the inclusive range.
    pub fn with_submitted_between(mut self, after: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        self.submitted_after = Some(after);
        self.submitted_before = Some(before);
        self
    }
}
