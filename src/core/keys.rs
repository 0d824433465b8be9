//! Controller key.
//!
//! The x25519 key that seals every identity secret in the catalog. It lives
//! next to the catalog as `identity.key` with owner-only permissions.

use std::fs;
use std::path::{Path, PathBuf};

use age::secrecy::ExposeSecret;
use age::x25519;
use tracing::{debug, warn};

use crate::core::constants;
use crate::core::types::PublicKey;
use crate::error::{Result, StoreError};

/// The controller's private key.
pub struct ControllerKey {
    inner: x25519::Identity,
    path: PathBuf,
}

impl std::fmt::Debug for ControllerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerKey")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ControllerKey {
    /// Key file path inside `home`.
    pub fn path_in(home: &Path) -> PathBuf {
        home.join(constants::KEY_FILE)
    }

    /// Load the key from `home`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoPrivateKey` if the key file is missing, or
    /// `StoreError::InvalidFormat` if it does not hold an age secret key.
    pub fn load(home: &Path) -> Result<Self> {
        let path = Self::path_in(home);
        debug!(path = %path.display(), "loading controller key");

        if !path.exists() {
            return Err(StoreError::NoPrivateKey(home.display().to_string()).into());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = fs::metadata(&path) {
                let mode = metadata.permissions().mode() & 0o777;
                if mode & 0o077 != 0 {
                    warn!(
                        path = %path.display(),
                        mode = %format!("{:o}", mode),
                        "insecure key file permissions"
                    );
                }
            }
        }

        let contents = zeroize::Zeroizing::new(
            fs::read_to_string(&path).map_err(StoreError::ReadFailed)?,
        );
        let inner: x25519::Identity = contents
            .trim()
            .parse()
            .map_err(|e: &str| StoreError::InvalidFormat(e.to_string()))?;

        Ok(Self { inner, path })
    }

    /// Generate a new key and write it into `home`.
    pub fn generate(home: &Path) -> Result<Self> {
        debug!(path = %home.display(), "generating controller key");

        let inner = x25519::Identity::generate();
        fs::create_dir_all(home).map_err(StoreError::WriteFailed)?;

        let path = Self::path_in(home);
        let secret = inner.to_string();
        fs::write(&path, format!("{}\n", secret.expose_secret())).map_err(StoreError::WriteFailed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(StoreError::WriteFailed)?;
        }

        debug!(path = %path.display(), "controller key saved");
        Ok(Self { inner, path })
    }

    /// Recipient secrets are sealed for.
    pub fn recipient(&self) -> x25519::Recipient {
        self.inner.to_public()
    }

    /// Public key string.
    pub fn public_key(&self) -> PublicKey {
        self.recipient().to_string()
    }

    /// The age identity used to unseal secrets.
    pub fn as_age(&self) -> &x25519::Identity {
        &self.inner
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
