//! Full-stack walkthroughs: submit sealed content, disclose keys, open,
//! resolve.

use docket_client::DocumentCipherEnvelope;
use docket_crypto::OaepGcmProvider;
use docket_custody::{KeyCustodian, LifecycleEngine};
use docket_store::{DocumentStore, NotificationStore, SessionDirectory, UserDirectory};
use docket_types::{DocumentStatus, NewUser, Role, SubmitRequest, User};
use pretty_assertions::assert_eq;
use std::sync::Arc;

struct Stack {
    users: UserDirectory,
    engine: LifecycleEngine,
    custodian: KeyCustodian,
    envelope: DocumentCipherEnvelope,
}

async fn stack() -> (Stack, User, User) {
    let users = UserDirectory::new();
    let documents = DocumentStore::new();
    let engine = LifecycleEngine::new(
        users.clone(),
        documents.clone(),
        SessionDirectory::new(),
        NotificationStore::new(),
    );
    let custodian = KeyCustodian::new(users.clone(), documents, Arc::new(OaepGcmProvider));
    let envelope = DocumentCipherEnvelope::with_default_provider();

    let approver = users
        .create(NewUser::new("approver", "Reviewing Approver", Role::Approver))
        .await
        .expect("approver account");
    let assistant = users
        .create(NewUser::new("assistant", "Submitting Assistant", Role::Assistant))
        .await
        .expect("assistant account");

    (
        Stack {
            users,
            engine,
            custodian,
            envelope,
        },
        approver,
        assistant,
    )
}

const ORIGINAL: &[u8] = b"FY26 budget figures\x00\xff\x00 with binary padding";

#[tokio::test]
async fn owner_round_trip_recovers_the_exact_original_bytes() {
    let (stack, _approver, assistant) = stack().await;

    // Upload: recover own key through a disclosure, seal, submit.
    let upload_pair = stack.envelope.generate_keypair().await.unwrap();
    let grant = stack
        .custodian
        .disclose_own(assistant.id, upload_pair.public_key_pem())
        .await
        .unwrap();
    let upload_key = stack.envelope.recover_key(&grant, &upload_pair).unwrap();
    let armored = stack.envelope.seal_document(&upload_key, ORIGINAL).unwrap();

    stack
        .engine
        .submit(
            assistant.id,
            SubmitRequest {
                title: "FY26 budget".to_string(),
                department: "Finance".to_string(),
                description: None,
                ciphertext_ref: "fy26-budget.enc".to_string(),
            },
        )
        .await
        .unwrap();

    // Download later with a fresh keypair: the same directory key comes
    // back and the ciphertext opens to the exact original bytes.
    let download_pair = stack.envelope.generate_keypair().await.unwrap();
    let grant = stack
        .custodian
        .disclose_own(assistant.id, download_pair.public_key_pem())
        .await
        .unwrap();
    let download_key = stack.envelope.recover_key(&grant, &download_pair).unwrap();
    assert_eq!(download_key.as_bytes(), upload_key.as_bytes());

    let opened = stack.envelope.open_document(&download_key, &armored).unwrap();
    assert_eq!(opened, ORIGINAL);
}

#[tokio::test]
async fn reviewer_opens_the_submission_and_resolves_it() {
    let (stack, approver, assistant) = stack().await;

    let upload_pair = stack.envelope.generate_keypair().await.unwrap();
    let grant = stack
        .custodian
        .disclose_own(assistant.id, upload_pair.public_key_pem())
        .await
        .unwrap();
    let upload_key = stack.envelope.recover_key(&grant, &upload_pair).unwrap();
    let armored = stack.envelope.seal_document(&upload_key, ORIGINAL).unwrap();

    let document = stack
        .engine
        .submit(
            assistant.id,
            SubmitRequest {
                title: "FY26 budget".to_string(),
                department: "Finance".to_string(),
                description: Some("Figures for review".to_string()),
                ciphertext_ref: "fy26-budget.enc".to_string(),
            },
        )
        .await
        .unwrap();

    // The reviewer never sees the owner's raw key, only a wrap under
    // their own single-use public key.
    let review_pair = stack.envelope.generate_keypair().await.unwrap();
    let grant = stack
        .custodian
        .disclose_for(
            approver.id,
            Role::Approver,
            document.id,
            review_pair.public_key_pem(),
        )
        .await
        .unwrap();
    let review_key = stack.envelope.recover_key(&grant, &review_pair).unwrap();

    let owner_key = stack.users.symmetric_key(assistant.id).await.unwrap();
    assert_eq!(review_key.as_bytes(), owner_key.as_bytes());

    let opened = stack.envelope.open_document(&review_key, &armored).unwrap();
    assert_eq!(opened, ORIGINAL);

    let summary = stack
        .engine
        .approve(approver.id, document.id, Some("checked against ledger".to_string()))
        .await
        .unwrap();
    assert_eq!(summary.status, DocumentStatus::Approved);
    assert_eq!(summary.remarks.as_deref(), Some("checked against ledger"));
}
