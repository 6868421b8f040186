//! Lifecycle engine — submission, one-way status transitions, queries.
//!
//! A document enters custody as `pending` and leaves that status exactly
//! once. The decision point is a conditional swap inside the document
//! store, so two reviewers racing on the same document produce one
//! accepted transition and one `InvalidTransition` refusal, never a
//! silent overwrite.
//!
//! Every accepted submission or transition records a notification and
//! fans it out to each active session of the recipient. Fan-out is
//! best-effort: a relay failure is logged and dropped after the status
//! change has already committed.

use crate::config::CustodyConfig;
use crate::custodian::{active_account, ensure_single_active_approver};
use crate::error::{CustodyError, CustodyResult};
use crate::gate::{AccessGate, DocumentAction};
use crate::relay::{LogOnlyRelay, NotificationRelay};
use chrono::Utc;
use docket_store::{DocumentStore, NotificationStore, SessionDirectory, UserDirectory};
use docket_types::{
    Document, DocumentId, DocumentQuery, DocumentStatus, DocumentSummary, NotificationIntent,
    Role, SubmitRequest, TransitionRequest, User, UserId,
};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the document approval state machine over the backing stores.
#[derive(Clone)]
pub struct LifecycleEngine {
    users: UserDirectory,
    documents: DocumentStore,
    sessions: SessionDirectory,
    notifications: NotificationStore,
    relay: Arc<dyn NotificationRelay>,
    gate: AccessGate,
    config: CustodyConfig,
}

impl LifecycleEngine {
    /// Creates an engine with the default config and a log-only relay.
    pub fn new(
        users: UserDirectory,
        documents: DocumentStore,
        sessions: SessionDirectory,
        notifications: NotificationStore,
    ) -> Self {
        Self {
            users,
            documents,
            sessions,
            notifications,
            relay: Arc::new(LogOnlyRelay),
            gate: AccessGate,
            config: CustodyConfig::default(),
        }
    }

    /// Replaces the notification relay.
    pub fn with_relay(mut self, relay: Arc<dyn NotificationRelay>) -> Self {
        self.relay = relay;
        self
    }

    /// Replaces the validation config.
    pub fn with_config(mut self, config: CustodyConfig) -> Self {
        self.config = config;
        self
    }

    /// Accepts a new document for review.
    ///
    /// Only assistants submit, always as the owner of what they submit.
    /// Submission requires a reviewing approver to exist: none at all is
    /// `NotFound`, a deactivated one is `Authorization`, and more than one
    /// active is `Conflict`. The stored document starts `pending` and the
    /// approver is notified on every active session.
    pub async fn submit(&self, actor: UserId, request: SubmitRequest) -> CustodyResult<Document> {
        let title = required("title", &request.title)?;
        bounded("title", &title, self.config.max_title_chars)?;
        let department = required("department", &request.department)?;
        bounded("department", &department, self.config.max_department_chars)?;
        let description = request.description.as_deref().and_then(normalized);
        if let Some(text) = &description {
            bounded("description", text, self.config.max_description_chars)?;
        }
        let ciphertext_ref = required("ciphertext reference", &request.ciphertext_ref)?;

        let user = active_account(&self.users, actor).await?;
        self.gate.authorize(user.role, DocumentAction::Submit)?;
        let approver = self.resolve_approver().await?;

        let document = Document {
            id: DocumentId::new(),
            owner_id: actor,
            title,
            department,
            description,
            status: DocumentStatus::Pending,
            remarks: None,
            ciphertext_ref,
            created_at: Utc::now(),
            approved_at: None,
            rejected_at: None,
            correction_requested_at: None,
        };
        self.documents.insert(document.clone()).await;
        info!(document = %document.id, owner = %actor, "document submitted for review");

        self.notify(NotificationIntent {
            recipient: approver.id,
            title: "New document submitted".to_string(),
            body: format!("{} has been uploaded", document.title),
            kind: DocumentStatus::Pending,
        })
        .await;

        Ok(document)
    }

    /// Resolves a pending document to `target`.
    ///
    /// Preconditions are checked in a fixed order: the target must be an
    /// actual resolution, the document must exist, the actor must be an
    /// authorized reviewer, the document must still be `pending`, and
    /// remarks must be present when a correction is requested. The status
    /// swap itself is conditional, so a transition that loses a race is
    /// refused like any other attempt on a resolved document.
    pub async fn transition(
        &self,
        actor: UserId,
        request: TransitionRequest,
    ) -> CustodyResult<DocumentSummary> {
        let TransitionRequest {
            document_id,
            target,
            remarks,
        } = request;

        if target == DocumentStatus::Pending {
            return Err(CustodyError::Validation(
                "pending is not a transition target".to_string(),
            ));
        }

        let document = self.documents.get(document_id).await?;

        let user = active_account(&self.users, actor).await?;
        self.gate.authorize(user.role, DocumentAction::Transition)?;
        if user.role == Role::Approver {
            ensure_single_active_approver(&self.users).await?;
        }

        if document.status != DocumentStatus::Pending {
            return Err(CustodyError::InvalidTransition {
                from: document.status,
            });
        }

        let remarks = remarks.as_deref().and_then(normalized);
        if let Some(text) = &remarks {
            bounded("remarks", text, self.config.max_remarks_chars)?;
        }
        if target == DocumentStatus::CorrectionRequested && remarks.is_none() {
            return Err(CustodyError::Validation(
                "remarks are required when requesting a correction".to_string(),
            ));
        }

        let updated = self
            .documents
            .update_status_if_pending(document_id, target, remarks, Utc::now())
            .await?;
        info!(document = %document_id, status = %target, actor = %actor, "document transition accepted");

        self.notify(NotificationIntent {
            recipient: updated.owner_id,
            title: "Document status updated".to_string(),
            body: format!("{} has been {}", updated.title, transition_phrase(target)),
            kind: target,
        })
        .await;

        Ok(updated.summary())
    }

    /// Approves a pending document.
    pub async fn approve(
        &self,
        actor: UserId,
        document_id: DocumentId,
        remarks: Option<String>,
    ) -> CustodyResult<DocumentSummary> {
        self.transition(
            actor,
            TransitionRequest {
                document_id,
                target: DocumentStatus::Approved,
                remarks,
            },
        )
        .await
    }

    /// Rejects a pending document.
    pub async fn reject(
        &self,
        actor: UserId,
        document_id: DocumentId,
        remarks: Option<String>,
    ) -> CustodyResult<DocumentSummary> {
        self.transition(
            actor,
            TransitionRequest {
                document_id,
                target: DocumentStatus::Rejected,
                remarks,
            },
        )
        .await
    }

    /// Sends a pending document back for correction. Remarks are
    /// mandatory for this target.
    pub async fn request_correction(
        &self,
        actor: UserId,
        document_id: DocumentId,
        remarks: impl Into<String>,
    ) -> CustodyResult<DocumentSummary> {
        self.transition(
            actor,
            TransitionRequest {
                document_id,
                target: DocumentStatus::CorrectionRequested,
                remarks: Some(remarks.into()),
            },
        )
        .await
    }

    /// Fetches one document. Assistants may only read their own;
    /// reviewers may read any.
    pub async fn document(&self, actor: UserId, document_id: DocumentId) -> CustodyResult<Document> {
        let document = self.documents.get(document_id).await?;
        let user = active_account(&self.users, actor).await?;
        if user.role == Role::Assistant && document.owner_id != actor {
            return Err(CustodyError::Authorization(
                "assistants may only read their own documents".to_string(),
            ));
        }
        Ok(document)
    }

    /// Lists documents matching the query, newest first.
    ///
    /// At least one status filter is required. Assistants are always
    /// limited to their own documents: naming another creator is refused,
    /// naming none filters to self.
    pub async fn query(
        &self,
        actor: UserId,
        mut query: DocumentQuery,
    ) -> CustodyResult<Vec<Document>> {
        if query.statuses.is_empty() {
            return Err(CustodyError::Validation(
                "at least one status filter is required".to_string(),
            ));
        }
        if let (Some(after), Some(before)) = (query.submitted_after, query.submitted_before) {
            if after > before {
                return Err(CustodyError::Validation(
                    "date range start is after its end".to_string(),
                ));
            }
        }

        let user = active_account(&self.users, actor).await?;
        if user.role == Role::Assistant {
            if query.created_by.is_some_and(|creator| creator != actor) {
                return Err(CustodyError::Authorization(
                    "assistants may only list their own documents".to_string(),
                ));
            }
            query.created_by = Some(actor);
        } else {
            self.gate.authorize(user.role, DocumentAction::ListByCreator)?;
        }

        Ok(self.documents.query(&query).await)
    }

    /// Resolves the single reviewing approver fresh from the directory.
    async fn resolve_approver(&self) -> CustodyResult<User> {
        let approvers = self.users.approvers().await;
        if approvers.is_empty() {
            return Err(CustodyError::NotFound(
                "no approver account exists".to_string(),
            ));
        }
        let mut active: Vec<User> = approvers.into_iter().filter(|u| u.is_active).collect();
        match active.len() {
            0 => Err(CustodyError::Authorization(
                "the approver account is deactivated".to_string(),
            )),
            1 => Ok(active.remove(0)),
            n => Err(CustodyError::Conflict(format!(
                "{n} active approvers present; approver actions require exactly one"
            ))),
        }
    }

    /// Records the intent and pushes it to every active session of the
    /// recipient. Relay failures are logged and dropped.
    async fn notify(&self, intent: NotificationIntent) {
        let recipient = intent.recipient;
        let title = intent.title.clone();
        let body = intent.body.clone();
        self.notifications.record(intent).await;

        for token in self.sessions.active_device_tokens(recipient).await {
            if let Err(err) = self.relay.send(&token, &title, &body).await {
                warn!(recipient = %recipient, error = %err, "notification delivery failed");
            }
        }
    }
}

impl fmt::Debug for LifecycleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEngine")
            .field("config", &self.config)
            .finish()
    }
}

fn transition_phrase(target: DocumentStatus) -> &'static str {
    match target {
        DocumentStatus::Pending => "submitted",
        DocumentStatus::Approved => "approved",
        DocumentStatus::Rejected => "rejected",
        DocumentStatus::CorrectionRequested => "sent back for correction",
    }
}

fn normalized(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required(field: &str, value: &str) -> CustodyResult<String> {
    normalized(value).ok_or_else(|| CustodyError::Validation(format!("{field} is required")))
}

fn bounded(field: &str, value: &str, max_chars: usize) -> CustodyResult<()> {
    if value.chars().count() > max_chars {
        return Err(CustodyError::Validation(format!(
            "{field} exceeds {max_chars} characters"
        )));
    }
    Ok(())
}
