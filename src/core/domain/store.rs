//! Ordered identity store.
//!
//! Insertion order is display order. Stores are values: every change
//! produces a new store so a published one is never mutated.

use serde::{Deserialize, Serialize};

use crate::core::domain::identity::ToolIdentity;
use crate::core::validation::validate_name;
use crate::error::{ConfigError, IdentityError, Result};

/// Ordered collection of identities for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityStore<I> {
    identities: Vec<I>,
}

impl<I> Default for IdentityStore<I> {
    fn default() -> Self {
        Self {
            identities: Vec::new(),
        }
    }
}

impl<I: ToolIdentity> IdentityStore<I> {
    /// Build a store, rejecting duplicate names.
    pub fn new(identities: Vec<I>) -> Result<Self> {
        let store = Self { identities };
        store.validate()?;
        Ok(store)
    }

    /// Check that every name is valid and unique.
    pub fn validate(&self) -> Result<()> {
        for (i, identity) in self.identities.iter().enumerate() {
            validate_name(identity.name())?;
            if self.identities[..i]
                .iter()
                .any(|other| other.name() == identity.name())
            {
                return Err(ConfigError::DuplicateIdentity {
                    tool: I::TOOL,
                    name: identity.name().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.identities.iter()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.identities.iter().map(|i| i.name()).collect()
    }

    /// A copy of this store with `identity` added.
    ///
    /// An identity with the same name is replaced in place when `force` is
    /// set, keeping its position.
    pub fn with(&self, identity: I, force: bool) -> Result<Self> {
        let mut identities = self.identities.clone();
        match identities.iter().position(|i| i.name() == identity.name()) {
            Some(_) if !force => {
                return Err(IdentityError::AlreadyExists {
                    tool: I::TOOL,
                    name: identity.name().to_string(),
                }
                .into())
            }
            Some(pos) => identities[pos] = identity,
            None => identities.push(identity),
        }
        Ok(Self { identities })
    }

    /// A copy of this store without the identity called `name`.
    pub fn without(&self, name: &str) -> Result<Self> {
        if !self.identities.iter().any(|i| i.name() == name) {
            return Err(IdentityError::NotFound {
                tool: I::TOOL,
                name: name.to_string(),
            }
            .into());
        }
        let identities = self
            .identities
            .iter()
            .filter(|i| i.name() != name)
            .cloned()
            .collect();
        Ok(Self { identities })
    }
}
