//! Plaintext catalog import.
//!
//! An administrator describes the whole identity list in a plaintext TOML
//! file. Importing seals every secret for the controller key and produces a
//! [`Catalog`] that replaces the current one wholesale.
//!
//! ```toml
//! [[chef]]
//! name = "prod"
//! private_key_file = "keys/prod.pem"   # or inline: private_key = "..."
//! config_file = "..."
//! cookbook_path = "/cb"
//! run_list = "recipe[a]"
//! remote_host = "10.0.0.5"
//! remote_account = "deploy"
//!
//! [[cinc]]
//! name = "edge"
//! private_key = "..."
//! config_file_path = "edge/client.rb"
//! ```
//!
//! File references are resolved relative to the import file.

use std::path::{Path, PathBuf};

use age::x25519;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::domain::{BootstrapTarget, Catalog, ChefIdentity, CincIdentity, IdentityStore};
use crate::core::tool::Tool;
use crate::error::{ConfigError, IdentityError, Result};

/// Read a secret given either inline or as a file under `base`.
fn read_secret(
    inline: Option<&str>,
    file: Option<&Path>,
    base: &Path,
    tool: Tool,
    field: &'static str,
) -> Result<Zeroizing<String>> {
    match (inline, file) {
        (Some(value), None) => Ok(Zeroizing::new(value.to_string())),
        (None, Some(path)) => {
            let path = base.join(path);
            debug!(path = %path.display(), field, "reading secret file");
            let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
            Ok(Zeroizing::new(contents))
        }
        (None, None) => Err(IdentityError::MissingField { tool, field }.into()),
        (Some(_), Some(_)) => Err(ConfigError::InvalidValue {
            field,
            reason: "give the secret inline or as a file, not both".to_string(),
        }
        .into()),
    }
}

#[derive(Deserialize)]
struct ChefDraft {
    name: String,
    #[serde(default)]
    private_key: Option<String>,
    #[serde(default)]
    private_key_file: Option<PathBuf>,
    #[serde(default)]
    config_file: Option<String>,
    #[serde(default)]
    config_file_path: Option<PathBuf>,
    #[serde(flatten)]
    target: BootstrapTarget,
}

#[derive(Deserialize)]
struct CincDraft {
    name: String,
    #[serde(default)]
    private_key: Option<String>,
    #[serde(default)]
    private_key_file: Option<PathBuf>,
    #[serde(default)]
    config_file: Option<String>,
    #[serde(default)]
    config_file_path: Option<PathBuf>,
}

/// Parsed plaintext import file.
///
/// Holds plaintext secrets, so it has no `Debug`.
#[derive(Deserialize)]
pub struct ImportFile {
    #[serde(default)]
    chef: Vec<ChefDraft>,
    #[serde(default)]
    cinc: Vec<CincDraft>,
    #[serde(skip)]
    base: PathBuf,
}

impl ImportFile {
    /// Read and parse `path`.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading import file");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&contents, base)
    }

    /// Parse import TOML; file references resolve against `base`.
    pub fn parse(contents: &str, base: PathBuf) -> Result<Self> {
        let mut file: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        file.base = base;
        Ok(file)
    }

    /// Number of identities described.
    pub fn len(&self) -> usize {
        self.chef.len() + self.cinc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seal every secret for `recipient` and build the catalog.
    ///
    /// # Errors
    ///
    /// Fails on a missing secret, an unreadable secret file, an invalid or
    /// duplicate name, or an encryption error. Nothing is sealed partially:
    /// the caller gets a full catalog or an error.
    pub fn seal(&self, recipient: &x25519::Recipient) -> Result<Catalog> {
        let chef = self
            .chef
            .iter()
            .map(|draft| {
                let key = read_secret(
                    draft.private_key.as_deref(),
                    draft.private_key_file.as_deref(),
                    &self.base,
                    Tool::Chef,
                    "private_key",
                )?;
                let config = read_secret(
                    draft.config_file.as_deref(),
                    draft.config_file_path.as_deref(),
                    &self.base,
                    Tool::Chef,
                    "config_file",
                )?;
                ChefIdentity::seal(
                    draft.name.as_str(),
                    &key,
                    &config,
                    draft.target.clone(),
                    recipient,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let cinc = self
            .cinc
            .iter()
            .map(|draft| {
                let key = read_secret(
                    draft.private_key.as_deref(),
                    draft.private_key_file.as_deref(),
                    &self.base,
                    Tool::Cinc,
                    "private_key",
                )?;
                let config = read_secret(
                    draft.config_file.as_deref(),
                    draft.config_file_path.as_deref(),
                    &self.base,
                    Tool::Cinc,
                    "config_file",
                )?;
                CincIdentity::seal(draft.name.as_str(), &key, &config, recipient)
            })
            .collect::<Result<Vec<_>>>()?;

        let catalog = Catalog {
            chef: IdentityStore::new(chef)?,
            cinc: IdentityStore::new(cinc)?,
        };
        debug!(chef = catalog.chef.len(), cinc = catalog.cinc.len(), "import sealed");
        Ok(catalog)
    }
}
