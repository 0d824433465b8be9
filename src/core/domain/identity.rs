//! Identity types.
//!
//! An identity is a named bundle of key material plus, for Chef, the
//! parameters of the host it bootstraps. Identities are immutable once
//! built; an administrator replaces them, never edits them in place.

use age::x25519;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::core::secret::SealedSecret;
use crate::core::tool::Tool;
use crate::core::types::IdentityName;
use crate::core::validation::validate_name;
use crate::error::Result;

/// Behaviour shared by the per-tool identity variants.
pub trait ToolIdentity: Clone + Send + Sync {
    /// Tool this identity provisions with.
    const TOOL: Tool;

    /// Unique name within the tool's store.
    fn name(&self) -> &str;

    /// Sealed PEM private key.
    fn private_key(&self) -> &SealedSecret;

    /// Sealed knife/client configuration.
    fn config_file(&self) -> &SealedSecret;

    /// Open both secrets with the controller key.
    fn unseal(&self, key: &x25519::Identity) -> Result<Materials> {
        Ok(Materials {
            private_key: self.private_key().unseal(key)?,
            config_file: self.config_file().unseal(key)?,
        })
    }
}

/// Plaintext secrets of one identity, wiped on drop.
pub struct Materials {
    pub private_key: Zeroizing<String>,
    pub config_file: Zeroizing<String>,
}

/// Where and how a Chef identity bootstraps a remote host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapTarget {
    pub cookbook_path: String,
    pub run_list: String,
    pub remote_host: String,
    pub remote_account: String,
}

/// A Chef identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChefIdentity {
    name: IdentityName,
    private_key: SealedSecret,
    config_file: SealedSecret,
    #[serde(flatten)]
    target: BootstrapTarget,
}

impl ChefIdentity {
    /// Build from already sealed secrets.
    pub fn new(
        name: impl Into<IdentityName>,
        private_key: SealedSecret,
        config_file: SealedSecret,
        target: BootstrapTarget,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            private_key,
            config_file,
            target,
        })
    }

    /// Seal plaintext secrets for `recipient` and build the identity.
    pub fn seal(
        name: impl Into<IdentityName>,
        private_key: &str,
        config_file: &str,
        target: BootstrapTarget,
        recipient: &x25519::Recipient,
    ) -> Result<Self> {
        Self::new(
            name,
            SealedSecret::seal(private_key, recipient)?,
            SealedSecret::seal(config_file, recipient)?,
            target,
        )
    }

    pub fn cookbook_path(&self) -> &str {
        &self.target.cookbook_path
    }

    pub fn run_list(&self) -> &str {
        &self.target.run_list
    }

    pub fn remote_host(&self) -> &str {
        &self.target.remote_host
    }

    pub fn remote_account(&self) -> &str {
        &self.target.remote_account
    }
}

impl ToolIdentity for ChefIdentity {
    const TOOL: Tool = Tool::Chef;

    fn name(&self) -> &str {
        &self.name
    }

    fn private_key(&self) -> &SealedSecret {
        &self.private_key
    }

    fn config_file(&self) -> &SealedSecret {
        &self.config_file
    }
}

/// A Cinc identity: a name and its two secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CincIdentity {
    name: IdentityName,
    private_key: SealedSecret,
    config_file: SealedSecret,
}

impl CincIdentity {
    /// Build from already sealed secrets.
    pub fn new(
        name: impl Into<IdentityName>,
        private_key: SealedSecret,
        config_file: SealedSecret,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            private_key,
            config_file,
        })
    }

    /// Seal plaintext secrets for `recipient` and build the identity.
    pub fn seal(
        name: impl Into<IdentityName>,
        private_key: &str,
        config_file: &str,
        recipient: &x25519::Recipient,
    ) -> Result<Self> {
        Self::new(
            name,
            SealedSecret::seal(private_key, recipient)?,
            SealedSecret::seal(config_file, recipient)?,
        )
    }
}

impl ToolIdentity for CincIdentity {
    const TOOL: Tool = Tool::Cinc;

    fn name(&self) -> &str {
        &self.name
    }

    fn private_key(&self) -> &SealedSecret {
        &self.private_key
    }

    fn config_file(&self) -> &SealedSecret {
        &self.config_file
    }
}
