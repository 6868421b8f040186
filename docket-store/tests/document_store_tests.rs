//! Tests for the document store, centered on the compare-and-swap status
//! update that resolves racing transitions.

use chrono::{Duration, Utc};
use docket_store::{DocumentStore, StoreError};
use docket_types::{Document, DocumentId, DocumentQuery, DocumentStatus, UserId};
use pretty_assertions::assert_eq;

fn pending_document(owner: UserId, title: &str, department: &str) -> Document {
    Document {
        id: DocumentId::new(),
        owner_id: owner,
        title: title.to_string(),
        department: department.to_string(),
        description: None,
        status: DocumentStatus::Pending,
        remarks: None,
        ciphertext_ref: format!("{}.enc", uuid::Uuid::new_v4()),
        created_at: Utc::now(),
        approved_at: None,
        rejected_at: None,
        correction_requested_at: None,
    }
}

// ── Basic access ─────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get() {
    let store = DocumentStore::new();
    let document = pending_document(UserId::new(), "Budget", "finance");

    store.insert(document.clone()).await;

    assert_eq!(store.get(document.id).await.unwrap(), document);
}

#[tokio::test]
async fn get_missing_document_fails() {
    let store = DocumentStore::new();
    let err = store.get(DocumentId::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::DocumentNotFound(_)));
}

// ── Conditional status update ────────────────────────────────────

#[tokio::test]
async fn swap_resolves_pending_document() {
    let store = DocumentStore::new();
    let document = pending_document(UserId::new(), "Budget", "finance");
    store.insert(document.clone()).await;

    let at = Utc::now();
    let updated = store
        .update_status_if_pending(document.id, DocumentStatus::Approved, None, at)
        .await
        .unwrap();

    assert_eq!(updated.status, DocumentStatus::Approved);
    assert_eq!(updated.approved_at, Some(at));
    assert!(updated.rejected_at.is_none());
    assert!(updated.correction_requested_at.is_none());
}

#[tokio::test]
async fn swap_stamps_timestamp_matching_target() {
    let store = DocumentStore::new();
    let owner = UserId::new();
    let at = Utc::now();

    for (target, pick) in [
        (
            DocumentStatus::Approved,
            (|d: &Document| d.approved_at) as fn(&Document) -> _,
        ),
        (DocumentStatus::Rejected, |d: &Document| d.rejected_at),
        (DocumentStatus::CorrectionRequested, |d: &Document| {
            d.correction_requested_at
        }),
    ] {
        let document = pending_document(owner, "Stamped", "ops");
        store.insert(document.clone()).await;

        let updated = store
            .update_status_if_pending(document.id, target, None, at)
            .await
            .unwrap();
        assert_eq!(pick(&updated), Some(at), "timestamp for {target}");
    }
}

#[tokio::test]
async fn swap_stores_remarks() {
    let store = DocumentStore::new();
    let document = pending_document(UserId::new(), "Budget", "finance");
    store.insert(document.clone()).await;

    let updated = store
        .update_status_if_pending(
            document.id,
            DocumentStatus::CorrectionRequested,
            Some("fix page 2".to_string()),
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(updated.remarks.as_deref(), Some("fix page 2"));
}

#[tokio::test]
async fn swap_on_resolved_document_reports_observed_status() {
    let store = DocumentStore::new();
    let document = pending_document(UserId::new(), "Budget", "finance");
    store.insert(document.clone()).await;

    store
        .update_status_if_pending(document.id, DocumentStatus::Rejected, None, Utc::now())
        .await
        .unwrap();

    let err = store
        .update_status_if_pending(document.id, DocumentStatus::Approved, None, Utc::now())
        .await
        .unwrap_err();

    match err {
        StoreError::StatusConflict { id, found } => {
            assert_eq!(id, document.id);
            assert_eq!(found, DocumentStatus::Rejected);
        }
        other => panic!("expected StatusConflict, got: {other:?}"),
    }

    // The losing call changed nothing.
    let stored = store.get(document.id).await.unwrap();
    assert_eq!(stored.status, DocumentStatus::Rejected);
    assert!(stored.approved_at.is_none());
}

#[tokio::test]
async fn swap_on_missing_document_fails() {
    let store = DocumentStore::new();
    let err = store
        .update_status_if_pending(DocumentId::new(), DocumentStatus::Approved, None, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DocumentNotFound(_)));
}

#[tokio::test]
async fn concurrent_swaps_have_exactly_one_winner() {
    let store = DocumentStore::new();
    let document = pending_document(UserId::new(), "Contested", "legal");
    store.insert(document.clone()).await;

    let approve = {
        let store = store.clone();
        let id = document.id;
        tokio::spawn(async move {
            store
                .update_status_if_pending(id, DocumentStatus::Approved, None, Utc::now())
                .await
        })
    };
    let reject = {
        let store = store.clone();
        let id = document.id;
        tokio::spawn(async move {
            store
                .update_status_if_pending(id, DocumentStatus::Rejected, None, Utc::now())
                .await
        })
    };

    let (approve, reject) = (approve.await.unwrap(), reject.await.unwrap());
    assert_ne!(
        approve.is_ok(),
        reject.is_ok(),
        "exactly one racing swap must win"
    );

    let winner = if approve.is_ok() {
        DocumentStatus::Approved
    } else {
        DocumentStatus::Rejected
    };
    assert_eq!(store.get(document.id).await.unwrap().status, winner);
}

// ── Queries ──────────────────────────────────────────────────────

#[tokio::test]
async fn query_filters_by_status_set() {
    let store = DocumentStore::new();
    let owner = UserId::new();

    let pending = pending_document(owner, "Pending", "ops");
    let resolved = pending_document(owner, "Resolved", "ops");
    store.insert(pending.clone()).await;
    store.insert(resolved.clone()).await;
    store
        .update_status_if_pending(resolved.id, DocumentStatus::Approved, None, Utc::now())
        .await
        .unwrap();

    let query = DocumentQuery::with_statuses(vec![
        DocumentStatus::Approved,
        DocumentStatus::Rejected,
    ]);
    let results = store.query(&query).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, resolved.id);
}

#[tokio::test]
async fn query_filters_by_department_and_creator() {
    let store = DocumentStore::new();
    let mira = UserId::new();
    let noor = UserId::new();

    store.insert(pending_document(mira, "A", "finance")).await;
    store.insert(pending_document(mira, "B", "ops")).await;
    store.insert(pending_document(noor, "C", "finance")).await;

    let query = DocumentQuery::with_statuses(vec![DocumentStatus::Pending])
        .with_department("finance")
        .with_creator(mira);
    let results = store.query(&query).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "A");
}

#[tokio::test]
async fn query_filters_by_submission_window() {
    let store = DocumentStore::new();
    let owner = UserId::new();
    let now = Utc::now();

    let mut old = pending_document(owner, "Old", "ops");
    old.created_at = now - Duration::days(30);
    let mut recent = pending_document(owner, "Recent", "ops");
    recent.created_at = now - Duration::days(1);
    store.insert(old).await;
    store.insert(recent.clone()).await;

    let query = DocumentQuery::with_statuses(vec![DocumentStatus::Pending])
        .with_submitted_between(now - Duration::days(7), now);
    let results = store.query(&query).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, recent.id);
}

#[tokio::test]
async fn query_orders_newest_first() {
    let store = DocumentStore::new();
    let owner = UserId::new();
    let now = Utc::now();

    for (title, age_days) in [("oldest", 3), ("middle", 2), ("newest", 1)] {
        let mut document = pending_document(owner, title, "ops");
        document.created_at = now - Duration::days(age_days);
        store.insert(document).await;
    }

    let results = store
        .query(&DocumentQuery::with_statuses(vec![DocumentStatus::Pending]))
        .await;

    let titles: Vec<&str> = results.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}
