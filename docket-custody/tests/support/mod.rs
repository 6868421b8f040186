//! Shared harness for custody integration tests.
//!
//! Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use docket_crypto::{EphemeralKeyPair, OaepGcmProvider};
use docket_custody::{KeyCustodian, LifecycleEngine, NotificationRelay, RelayError};
use docket_store::{DocumentStore, NotificationStore, SessionDirectory, UserDirectory};
use docket_types::{Document, NewUser, Role, SubmitRequest, User, UserId};
use std::sync::{Arc, Mutex, OnceLock};
use uuid::Uuid;

/// One delivery captured by [`RecordingRelay`].
#[derive(Clone, Debug)]
pub struct SentPush {
    pub device_token: String,
    pub title: String,
    pub body: String,
}

/// Relay that records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingRelay {
    sent: Mutex<Vec<SentPush>>,
}

impl RecordingRelay {
    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().expect("relay mutex poisoned").clone()
    }
}

#[async_trait]
impl NotificationRelay for RecordingRelay {
    async fn send(&self, device_token: &str, title: &str, body: &str) -> Result<(), RelayError> {
        self.sent
            .lock()
            .expect("relay mutex poisoned")
            .push(SentPush {
                device_token: device_token.to_string(),
                title: title.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}

/// Relay whose every delivery fails.
pub struct FailingRelay;

#[async_trait]
impl NotificationRelay for FailingRelay {
    async fn send(&self, _device_token: &str, _title: &str, _body: &str) -> Result<(), RelayError> {
        Err(RelayError::Delivery("push service unavailable".to_string()))
    }
}

/// Engine and custodian wired over fresh stores and a recording relay.
pub struct Harness {
    pub users: UserDirectory,
    pub documents: DocumentStore,
    pub sessions: SessionDirectory,
    pub notifications: NotificationStore,
    pub engine: LifecycleEngine,
    pub custodian: KeyCustodian,
    pub relay: Arc<RecordingRelay>,
}

pub fn harness() -> Harness {
    let users = UserDirectory::new();
    let documents = DocumentStore::new();
    let sessions = SessionDirectory::new();
    let notifications = NotificationStore::new();
    let relay = Arc::new(RecordingRelay::default());
    let engine = LifecycleEngine::new(
        users.clone(),
        documents.clone(),
        sessions.clone(),
        notifications.clone(),
    )
    .with_relay(relay.clone());
    let custodian = KeyCustodian::new(users.clone(), documents.clone(), Arc::new(OaepGcmProvider));
    Harness {
        users,
        documents,
        sessions,
        notifications,
        engine,
        custodian,
        relay,
    }
}

/// Creates an active account with a unique username.
pub async fn account(h: &Harness, role: Role) -> User {
    h.users
        .create(NewUser::new(
            format!("{role}-{}", Uuid::new_v4()),
            "Test Account",
            role,
        ))
        .await
        .expect("account creation must succeed")
}

/// A well-formed submission request.
pub fn submit_request(title: &str) -> SubmitRequest {
    SubmitRequest {
        title: title.to_string(),
        department: "Records".to_string(),
        description: Some("Quarterly filing".to_string()),
        ciphertext_ref: format!("{}.enc", Uuid::new_v4()),
    }
}

/// Submits a document owned by `owner` and returns it.
pub async fn submitted_document(h: &Harness, owner: UserId) -> Document {
    h.engine
        .submit(owner, submit_request("Budget report"))
        .await
        .expect("submission must succeed")
}

/// One approver, one assistant, and a pending document the assistant owns.
pub async fn seeded(h: &Harness) -> (User, User, Document) {
    let approver = account(h, Role::Approver).await;
    let assistant = account(h, Role::Assistant).await;
    let document = submitted_document(h, assistant.id).await;
    (approver, assistant, document)
}

static PAIR: OnceLock<EphemeralKeyPair> = OnceLock::new();

/// Shared requester keypair; RSA-2048 generation is expensive in debug
/// builds.
pub fn requester_pair() -> &'static EphemeralKeyPair {
    PAIR.get_or_init(|| EphemeralKeyPair::generate().expect("keypair generation must succeed"))
}
