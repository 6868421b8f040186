//! Key custodian — disclosure of per-user symmetric keys, always wrapped.
//!
//! A key crosses the custody boundary in exactly one form: RSA-OAEP
//! ciphertext under a public key the requester generated for this single
//! exchange, encoded base64. The custodian never returns, logs, or embeds
//! raw key bytes anywhere.
//!
//! Proxy disclosure trusts nothing upstream: the requester's claimed role
//! is checked on its own, then checked again against the directory, and
//! approver requests are refused outright while the directory holds more
//! than one active approver.

use crate::error::{CustodyError, CustodyResult};
use crate::gate::{AccessGate, DocumentAction};
use docket_crypto::CryptoProvider;
use docket_store::{DocumentStore, UserDirectory};
use docket_types::{DisclosureRequest, DocumentId, Role, User, UserId, WrappedKey};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Brokers wrapped disclosure of the symmetric keys held by the user
/// directory.
#[derive(Clone)]
pub struct KeyCustodian {
    users: UserDirectory,
    documents: DocumentStore,
    provider: Arc<dyn CryptoProvider>,
    gate: AccessGate,
}

impl KeyCustodian {
    pub fn new(
        users: UserDirectory,
        documents: DocumentStore,
        provider: Arc<dyn CryptoProvider>,
    ) -> Self {
        Self {
            users,
            documents,
            provider,
            gate: AccessGate,
        }
    }

    /// Routes a disclosure request: a document id present means proxy
    /// disclosure, absent means the requester wants their own key.
    ///
    /// The claimed role is verified against the directory on either path.
    pub async fn disclose(
        &self,
        requester: UserId,
        claimed_role: Role,
        request: &DisclosureRequest,
    ) -> CustodyResult<WrappedKey> {
        match request.document_id {
            Some(document) => {
                self.disclose_for(requester, claimed_role, document, &request.public_key_pem)
                    .await
            }
            None => {
                let user = active_account(&self.users, requester).await?;
                verify_claimed_role(&user, claimed_role)?;
                self.disclose_own(requester, &request.public_key_pem).await
            }
        }
    }

    /// Disclosure of the requester's own key, open to every role.
    pub async fn disclose_own(
        &self,
        requester: UserId,
        public_key_pem: &str,
    ) -> CustodyResult<WrappedKey> {
        require_public_key(public_key_pem)?;
        let user = active_account(&self.users, requester).await?;
        self.gate.authorize(user.role, DocumentAction::DiscloseOwn)?;

        let key = self.users.symmetric_key(requester).await?;
        let wrapped_key_base64 = self.provider.wrap_key(&key, public_key_pem)?;

        info!(requester = %requester, "disclosed requester's own key");
        Ok(WrappedKey { wrapped_key_base64 })
    }

    /// Proxy disclosure: wraps the document owner's key for a reviewer.
    ///
    /// The claimed role is refused before anything is looked up unless it
    /// is reviewer-grade, and that refusal stands even when the requester
    /// owns the document — owners recover their key through
    /// [`disclose_own`](Self::disclose_own).
    pub async fn disclose_for(
        &self,
        requester: UserId,
        claimed_role: Role,
        document_id: DocumentId,
        public_key_pem: &str,
    ) -> CustodyResult<WrappedKey> {
        require_public_key(public_key_pem)?;

        if !matches!(claimed_role, Role::Approver | Role::Admin) {
            warn!(
                requester = %requester,
                document = %document_id,
                claimed_role = %claimed_role,
                "proxy disclosure refused for non-reviewer role"
            );
            return Err(CustodyError::Authorization(format!(
                "role '{claimed_role}' may not request keys on behalf of document owners"
            )));
        }

        let user = active_account(&self.users, requester).await?;
        verify_claimed_role(&user, claimed_role)?;
        self.gate.authorize(user.role, DocumentAction::DiscloseFor)?;
        if user.role == Role::Approver {
            ensure_single_active_approver(&self.users).await?;
        }

        let document = self.documents.get(document_id).await?;
        let key = self.users.symmetric_key(document.owner_id).await?;
        let wrapped_key_base64 = self.provider.wrap_key(&key, public_key_pem)?;

        info!(
            requester = %requester,
            document = %document_id,
            owner = %document.owner_id,
            "disclosed owner's key for review"
        );
        Ok(WrappedKey { wrapped_key_base64 })
    }
}

impl fmt::Debug for KeyCustodian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyCustodian").finish()
    }
}

fn require_public_key(public_key_pem: &str) -> CustodyResult<()> {
    if public_key_pem.trim().is_empty() {
        return Err(CustodyError::Validation(
            "public key is required".to_string(),
        ));
    }
    Ok(())
}

fn verify_claimed_role(user: &User, claimed_role: Role) -> CustodyResult<()> {
    if user.role != claimed_role {
        warn!(
            user = %user.id,
            claimed_role = %claimed_role,
            directory_role = %user.role,
            "claimed role does not match directory"
        );
        return Err(CustodyError::Authorization(format!(
            "claimed role '{claimed_role}' does not match directory role '{}'",
            user.role
        )));
    }
    Ok(())
}

/// Looks an actor up and refuses deactivated accounts.
pub(crate) async fn active_account(users: &UserDirectory, id: UserId) -> CustodyResult<User> {
    let user = users.get(id).await?;
    if !user.is_active {
        return Err(CustodyError::Authorization(format!(
            "account '{}' is deactivated",
            user.username
        )));
    }
    Ok(user)
}

/// Re-resolves the active-approver invariant from the directory.
///
/// The uniqueness guard runs at account creation only, so reactivating a
/// second approver slips past it. Approver-role actors are refused here
/// whenever the directory currently holds more than one active approver.
pub(crate) async fn ensure_single_active_approver(users: &UserDirectory) -> CustodyResult<()> {
    let active = users
        .approvers()
        .await
        .into_iter()
        .filter(|u| u.is_active)
        .count();
    if active > 1 {
        return Err(CustodyError::Conflict(format!(
            "{active} active approvers present; approver actions require exactly one"
        )));
    }
    Ok(())
}
