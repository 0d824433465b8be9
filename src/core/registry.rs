//! Process-wide identity registry.
//!
//! Owns the catalog for the life of the process. Builds take cheap
//! snapshots; an administrative save persists a whole new catalog and then
//! swaps it in, so a reader sees either the old list or the new one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::domain::Catalog;
use crate::core::keys::ControllerKey;
use crate::error::{ConfigError, Error, Result};

/// Loaded catalog plus the key that opens its secrets.
#[derive(Debug)]
pub struct Registry {
    home: PathBuf,
    key: ControllerKey,
    current: RwLock<Arc<Catalog>>,
}

impl Registry {
    /// Create a new home with a fresh controller key and empty catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyInitialized` if a catalog already exists.
    pub fn init(home: &Path) -> Result<Self> {
        if Config::exists(home) {
            return Err(ConfigError::AlreadyInitialized.into());
        }

        let key = ControllerKey::generate(home)?;
        Config::new(key.public_key()).save(home)?;
        info!(home = %home.display(), "initialized identity catalog");

        Ok(Self {
            home: home.to_path_buf(),
            key,
            current: RwLock::new(Arc::new(Catalog::default())),
        })
    }

    /// Load the catalog and controller key from `home`.
    pub fn open(home: &Path) -> Result<Self> {
        let config = Config::load(home)?;
        let key = ControllerKey::load(home)?;

        if key.public_key() != config.meta.recipient {
            return Err(ConfigError::InvalidValue {
                field: "recipient",
                reason: "catalog was sealed for a different controller key".to_string(),
            }
            .into());
        }

        Ok(Self {
            home: home.to_path_buf(),
            key,
            current: RwLock::new(Arc::new(config.catalog())),
        })
    }

    /// The catalog as of now. Later saves do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Persist `catalog` and make it the current one.
    ///
    /// The whole list is replaced; nothing is merged with the previous
    /// catalog. Concurrent saves are serialized, so the last one to finish
    /// is both on disk and in memory. Readers holding an older snapshot
    /// keep it.
    pub fn replace(&self, catalog: Catalog) -> Result<()> {
        catalog.validate()?;

        // held across save and swap so the file and memory agree
        let mut guard = self
            .current
            .write()
            .map_err(|_| Error::Other("identity registry lock poisoned".to_string()))?;

        let mut config = Config::with_catalog(self.key.public_key(), catalog.clone());
        config.save(&self.home)?;
        *guard = Arc::new(catalog);

        debug!(
            chef = guard.chef.len(),
            cinc = guard.cinc.len(),
            "catalog replaced"
        );
        Ok(())
    }

    /// Key used to seal and unseal catalog secrets.
    pub fn key(&self) -> &ControllerKey {
        &self.key
    }
}
