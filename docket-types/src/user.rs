//! User accounts and roles.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role in the document approval hierarchy.
///
/// Assistants submit documents; the approver (at most one active
/// system-wide) and admins resolve them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    Approver,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Assistant => write!(f, "assistant"),
            Role::Approver => write!(f, "approver"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A user account as seen outside the store boundary.
///
/// Deliberately carries no key material: the per-user symmetric key is
/// owned by the user directory and is only ever released wrapped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
}

/// Payload for creating a user account.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub role: Role,
}

impl NewUser {
    pub fn new(username: impl Into<String>, full_name: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            role,
        }
    }
}
