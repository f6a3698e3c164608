//! # Session State
//!
//! The identity a command loop is acting as. Each loop owns one `SessionState` and
//! passes it by `&mut` into every dispatch, so concurrent loops never see each other's
//! login.
//!
//! `login` trusts the caller: it records an identity without checking credentials and
//! grants no permissions. Permissions only come from `establish`, which the
//! `authenticate` command calls after verifying a user account.

use crate::model::{PermissionSet, User, UserId};
use thiserror::Error;
use tracing::info;

/// Domain used for the synthetic email of an unverified login.
pub const LOGIN_MAIL_DOMAIN: &str = "mail.com";

pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Login name cannot be blank")]
    BlankName,
}

/// Who the session is acting as.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Set when the identity was verified against a user account.
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub permissions: PermissionSet,
    pub anonymous: bool,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            name: ANONYMOUS.to_string(),
            email: String::new(),
            permissions: PermissionSet::new(),
            anonymous: true,
        }
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            user_id: Some(user.id),
            name: user.username,
            email: user.email,
            permissions: user.permissions,
            anonymous: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<Identity>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an unverified identity `name` with email `name@mail.com`.
    pub fn login(&mut self, name: &str, _password: &str) -> Result<&Identity, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::BlankName);
        }
        let identity = Identity {
            user_id: None,
            name: name.to_string(),
            email: format!("{name}@{LOGIN_MAIL_DOMAIN}"),
            permissions: PermissionSet::new(),
            anonymous: false,
        };
        Ok(self.establish(identity))
    }

    pub fn anonymous_login(&mut self) -> &Identity {
        self.establish(Identity::anonymous())
    }

    /// Replaces the current identity.
    pub fn establish(&mut self, identity: Identity) -> &Identity {
        info!(user = %identity.name, "Login successful");
        self.current.insert(identity)
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Empty when nobody is logged in.
    pub fn permissions(&self) -> PermissionSet {
        self.current
            .as_ref()
            .map(|identity| identity.permissions.clone())
            .unwrap_or_default()
    }
}
