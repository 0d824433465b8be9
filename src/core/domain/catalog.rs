//! The full set of administered identities.

use crate::core::domain::{ChefIdentity, CincIdentity, IdentityStore};
use crate::error::Result;

/// Chef and Cinc stores, replaced together on every save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub chef: IdentityStore<ChefIdentity>,
    pub cinc: IdentityStore<CincIdentity>,
}

impl Catalog {
    /// Check both stores for duplicate names.
    pub fn validate(&self) -> Result<()> {
        self.chef.validate()?;
        self.cinc.validate()
    }

    /// Total number of identities.
    pub fn len(&self) -> usize {
        self.chef.len() + self.cinc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chef.is_empty() && self.cinc.is_empty()
    }
}
