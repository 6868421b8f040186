//! User directory — accounts and their symmetric document keys.
//!
//! The directory is the storage boundary for key material: each account
//! gets one random 256-bit key at creation, readable through
//! [`UserDirectory::symmetric_key`] but never part of the serializable
//! `User` record. Keys are write-once; nothing ever rotates or replaces
//! them, so disclosure reads need only the read lock.

use crate::error::{StoreError, StoreResult};
use docket_crypto::DocumentKey;
use docket_types::{NewUser, Role, User, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct UserRecord {
    user: User,
    key: DocumentKey,
}

/// Thread-safe registry of user accounts and their document keys.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates an account, generating its symmetric key.
    ///
    /// Enforces unique usernames and the system-wide invariant that at
    /// most one *active* approver exists. Note the guard runs at creation
    /// only — reactivating a deactivated approver bypasses it, which is
    /// why the custody layer re-checks by role lookup before honoring
    /// approver rights.
    pub async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let username = new_user.username.trim().to_string();
        let mut users = self.users.write().await;

        if users.values().any(|r| r.user.username == username) {
            return Err(StoreError::UsernameTaken(username));
        }

        if new_user.role == Role::Approver
            && users
                .values()
                .any(|r| r.user.role == Role::Approver && r.user.is_active)
        {
            return Err(StoreError::ApproverExists);
        }

        let user = User {
            id: UserId::new(),
            username,
            full_name: new_user.full_name,
            role: new_user.role,
            is_active: true,
        };
        users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                key: DocumentKey::generate(),
            },
        );

        info!(user = %user.id, role = %user.role, "created user account");
        Ok(user)
    }

    /// Retrieves an account by id.
    pub async fn get(&self, id: UserId) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|r| r.user.clone())
            .ok_or(StoreError::UserNotFound(id))
    }

    /// All accounts holding the approver role, active or not.
    ///
    /// Callers resolve "the approver" from this on every use; the
    /// directory never caches a singleton.
    pub async fn approvers(&self) -> Vec<User> {
        self.users
            .read()
            .await
            .values()
            .filter(|r| r.user.role == Role::Approver)
            .map(|r| r.user.clone())
            .collect()
    }

    /// Flips an account's active flag.
    pub async fn set_active(&self, id: UserId, active: bool) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let record = users.get_mut(&id).ok_or(StoreError::UserNotFound(id))?;
        record.user.is_active = active;
        debug!(user = %id, active, "updated account active flag");
        Ok(())
    }

    /// Releases a clone of the user's symmetric key.
    ///
    /// This is the disclosure boundary: the returned key must only ever
    /// leave the process wrapped.
    pub async fn symmetric_key(&self, id: UserId) -> StoreResult<DocumentKey> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|r| r.key.clone())
            .ok_or(StoreError::UserNotFound(id))
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}
