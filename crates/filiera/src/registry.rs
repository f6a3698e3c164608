//! # Prototype Registry
//!
//! Named templates handed out as independent copies. Used to stamp out user accounts
//! with preset permission sets ("Producer", "Curator", ...), but generic over any
//! cloneable template.
//!
//! Registering under an existing name replaces the old template (last writer wins).

use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Prototype name cannot be blank")]
    BlankName,

    #[error("Prototype not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct PrototypeRegistry<T> {
    prototypes: BTreeMap<String, T>,
}

impl<T> Default for PrototypeRegistry<T> {
    fn default() -> Self {
        Self {
            prototypes: BTreeMap::new(),
        }
    }
}

impl<T: Clone> PrototypeRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `template` under the trimmed `name`, returning the template it replaced.
    pub fn register(&mut self, name: &str, template: T) -> Result<Option<T>, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::BlankName);
        }
        let previous = self.prototypes.insert(name.to_string(), template);
        if previous.is_some() {
            info!(prototype = name, "Prototype replaced");
        } else {
            debug!(prototype = name, "Prototype registered");
        }
        Ok(previous)
    }

    /// An independent copy of the template registered under `name`.
    pub fn get_copy(&self, name: &str) -> Result<T, RegistryError> {
        let name = name.trim();
        self.prototypes
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.prototypes.contains_key(name.trim())
    }

    /// Registered names in sorted order.
    pub fn list_names(&self) -> Vec<&str> {
        self.prototypes.keys().map(String::as_str).collect()
    }

    pub fn clear(&mut self) {
        self.prototypes.clear();
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}
