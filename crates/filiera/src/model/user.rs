//! User accounts: the identities that log in and hold permissions.
//!
//! Accounts are stamped out of prototypes held in the
//! [`PrototypeRegistry`](crate::registry::PrototypeRegistry): a prototype is a template
//! `User` carrying nothing but a permission set, and every account created from it starts
//! with a copy of that set.

use crate::model::{PermissionSet, UserId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationState {
    Pending,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Never serialized; a deserialized account cannot log in until a password is set.
    #[serde(skip_serializing, default)]
    pub(crate) password_digest: String,
    pub permissions: PermissionSet,
    pub registration: RegistrationState,
}

/// Hex SHA-256 of `password`.
pub(crate) fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

impl User {
    /// A prototype account: only the permission set is meaningful.
    pub fn template(permissions: PermissionSet) -> Self {
        Self {
            id: UserId(0),
            username: String::new(),
            email: String::new(),
            password_digest: String::new(),
            permissions,
            registration: RegistrationState::Pending,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.registration == RegistrationState::Approved
    }

    pub fn verify_password(&self, password: &str) -> bool {
        !self.password_digest.is_empty() && self.password_digest == digest_password(password)
    }
}

/// Payload for creating a user account.
#[derive(Clone)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub email: String,
    pub permissions: PermissionSet,
}

impl UserCreate {
    /// Fills in the account fields on a copy of `template`'s permissions.
    pub fn from_template(template: &User, username: &str, password: &str, email: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            permissions: template.permissions.clone(),
        }
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("permissions", &self.permissions)
            .finish()
    }
}

/// DTO for account updates.
#[derive(Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
