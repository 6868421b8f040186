//! Document store with a compare-and-swap status update.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use docket_types::{Document, DocumentId, DocumentQuery, DocumentStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Thread-safe document registry.
///
/// Status is the one field that needs a transactional guard:
/// [`update_status_if_pending`](DocumentStore::update_status_if_pending)
/// checks and writes under a single write lock, so two racing transitions
/// resolve to exactly one winner.
#[derive(Clone)]
pub struct DocumentStore {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stores a newly submitted document.
    pub async fn insert(&self, document: Document) {
        self.documents
            .write()
            .await
            .insert(document.id, document);
    }

    /// Retrieves a cloned document.
    pub async fn get(&self, id: DocumentId) -> StoreResult<Document> {
        self.documents
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::DocumentNotFound(id))
    }

    /// Conditionally resolves a pending document.
    ///
    /// The swap succeeds only if the stored status is still `Pending` at
    /// write time; otherwise it fails with the status actually observed
    /// and changes nothing. Stamps the timestamp matching the target and
    /// stores the (already normalized) remarks.
    pub async fn update_status_if_pending(
        &self,
        id: DocumentId,
        target: DocumentStatus,
        remarks: Option<String>,
        at: DateTime<Utc>,
    ) -> StoreResult<Document> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(&id)
            .ok_or(StoreError::DocumentNotFound(id))?;

        if document.status != DocumentStatus::Pending {
            return Err(StoreError::StatusConflict {
                id,
                found: document.status,
            });
        }

        document.status = target;
        document.remarks = remarks;
        match target {
            DocumentStatus::Approved => document.approved_at = Some(at),
            DocumentStatus::Rejected => document.rejected_at = Some(at),
            DocumentStatus::CorrectionRequested => document.correction_requested_at = Some(at),
            DocumentStatus::Pending => {}
        }

        debug!(document = %id, status = %target, "document status swapped");
        Ok(document.clone())
    }

    /// Lists documents matching the query, newest first.
    pub async fn query(&self, query: &DocumentQuery) -> Vec<Document> {
        let documents = self.documents.read().await;
        let mut matched: Vec<Document> = documents
            .values()
            .filter(|d| query.statuses.contains(&d.status))
            .filter(|d| {
                query
                    .department
                    .as_ref()
                    .is_none_or(|dept| &d.department == dept)
            })
            .filter(|d| query.created_by.is_none_or(|owner| d.owner_id == owner))
            .filter(|d| query.submitted_after.is_none_or(|after| d.created_at >= after))
            .filter(|d| {
                query
                    .submitted_before
                    .is_none_or(|before| d.created_at <= before)
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
