use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An opaque token granting the ability to run a gated command.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Permission {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Permission {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The permissions held by an identity, or required by a gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of<I, P>(tokens: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        tokens.into_iter().map(Into::into).collect()
    }

    /// Returns `true` if the permission was not already present.
    pub fn insert(&mut self, permission: impl Into<Permission>) -> bool {
        let permission = permission.into();
        !permission.as_str().is_empty() && self.0.insert(permission)
    }

    /// Returns `true` if the permission was present.
    pub fn remove(&mut self, permission: &Permission) -> bool {
        self.0.remove(permission)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|p| p.as_str() == token)
    }

    pub fn is_superset(&self, required: &PermissionSet) -> bool {
        self.0.is_superset(&required.0)
    }

    /// Tokens of `required` this set lacks, in order.
    pub fn missing(&self, required: &PermissionSet) -> Vec<Permission> {
        required.0.difference(&self.0).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|p| !p.as_str().is_empty()).collect())
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.0.iter().map(Permission::as_str).collect();
        write!(f, "[{}]", tokens.join(", "))
    }
}
