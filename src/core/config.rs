//! Catalog file management.
//!
//! Handles reading, writing, and validating `identities.toml`, the file the
//! administrator's identity list is persisted to.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::{Catalog, ChefIdentity, CincIdentity, IdentityStore};
use crate::core::secret::parse_recipient;
use crate::core::types::PublicKey;
use crate::error::{ConfigError, Result};

/// Contents of `identities.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Metadata about the catalog
    pub meta: Meta,
    /// Chef identities in display order
    #[serde(default)]
    pub chef: IdentityStore<ChefIdentity>,
    /// Cinc identities in display order
    #[serde(default)]
    pub cinc: IdentityStore<CincIdentity>,
}

/// Metadata section of the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Catalog format version
    pub version: String,
    /// Public key every secret in the catalog is sealed for
    pub recipient: PublicKey,
    /// RFC 3339 timestamp of the last save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl Config {
    /// Create an empty catalog sealed for `recipient`.
    pub fn new(recipient: PublicKey) -> Self {
        Self {
            meta: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                recipient,
                updated: None,
            },
            chef: IdentityStore::default(),
            cinc: IdentityStore::default(),
        }
    }

    /// Build a config holding `catalog`.
    pub fn with_catalog(recipient: PublicKey, catalog: Catalog) -> Self {
        let mut config = Self::new(recipient);
        config.chef = catalog.chef;
        config.cinc = catalog.cinc;
        config
    }

    /// Catalog file path inside `home`.
    pub fn path_in(home: &Path) -> PathBuf {
        home.join(constants::CATALOG_FILE)
    }

    /// Check if a catalog exists in `home`.
    pub fn exists(home: &Path) -> bool {
        Self::path_in(home).exists()
    }

    /// Load the catalog from `home`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(home: &Path) -> Result<Self> {
        let path = Self::path_in(home);
        debug!(path = %path.display(), "loading catalog");

        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            chef = config.chef.len(),
            cinc = config.cinc.len(),
            "catalog loaded"
        );

        config.validate()?;
        Ok(config)
    }

    /// Save the catalog into `home`, stamping the update time.
    ///
    /// The file is written to a uniquely named sibling temp file and renamed
    /// into place, so a concurrent reader never sees a truncated catalog and
    /// concurrent saves never share a staging file.
    pub fn save(&mut self, home: &Path) -> Result<()> {
        use std::io::Write;

        debug!("saving catalog");

        self.meta.updated = Some(chrono::Utc::now().to_rfc3339());
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        std::fs::create_dir_all(home)?;
        let mut staging = tempfile::NamedTempFile::new_in(home)?;
        staging.write_all(contents.as_bytes())?;
        staging
            .persist(Self::path_in(home))
            .map_err(|e| e.error)?;

        Ok(())
    }

    /// The identity stores as a catalog.
    pub fn catalog(&self) -> Catalog {
        Catalog {
            chef: self.chef.clone(),
            cinc: self.cinc.clone(),
        }
    }

    /// Validate the catalog structure and contents.
    ///
    /// Checks:
    /// - Version field is present and dotted
    /// - Recipient is a valid age public key
    /// - Identity names are unique per tool
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue`, `ConfigError::MissingField` or
    /// `ConfigError::DuplicateIdentity` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating catalog");

        if self.meta.version.is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }
        if self.meta.version.split('.').count() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: format!("not a valid semver: {}", self.meta.version),
            }
            .into());
        }

        if parse_recipient(&self.meta.recipient).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "recipient",
                reason: format!("invalid age public key: {}", self.meta.recipient),
            }
            .into());
        }

        self.chef.validate()?;
        self.cinc.validate()
    }
}

/// Resolve the home directory holding the catalog and controller key.
///
/// An explicit path wins (the CLI fills it from `--home` or
/// `CHEF_IDENTITY_HOME`); otherwise `~/.chef-identity`.
pub fn resolve_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = explicit {
        return Ok(home);
    }
    let user_home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(user_home.join(constants::HOME_DIR))
}
