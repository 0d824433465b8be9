//! Error types.
//!
//! One enum per concern, wrapped by the top-level [`Error`]. Every error
//! maps to a [`Severity`] that tells the build driver whether to abort the
//! build or merely mark it failed.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::tool::Tool;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),

    /// Already written to the build log; not printed again.
    #[error(transparent)]
    Reported(Box<Error>),
}

/// How a build reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Stop the build entirely.
    Abort,
    /// Mark the build failed and carry on with finalization.
    Failure,
}

impl Error {
    /// Classify this error for the build driver.
    ///
    /// Lookup misses and cleanup failures abort; everything else fails.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Reported(inner) => inner.severity(),
            Error::Identity(IdentityError::NotFound { .. }) => Severity::Abort,
            Error::Workspace(WorkspaceError::Cleanup { .. }) => Severity::Abort,
            _ => Severity::Failure,
        }
    }

    /// Wrap errors the build log has already shown.
    ///
    /// Lookup misses and cleanup failures are echoed into the build log when
    /// they happen; everything else passes through unchanged.
    pub fn logged(self) -> Self {
        match self {
            e @ (Error::Identity(IdentityError::NotFound { .. })
            | Error::Workspace(WorkspaceError::Cleanup { .. })) => Error::Reported(Box::new(e)),
            e => e,
        }
    }

    /// The error itself, looking through [`Error::Reported`].
    pub fn underlying(&self) -> &Error {
        match self {
            Error::Reported(inner) => inner.underlying(),
            e => e,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            Severity::Abort => 2,
            Severity::Failure => 1,
        }
    }
}

/// Catalog configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("not initialized: no identity catalog found")]
    NotInitialized,

    #[error("already initialized: identity catalog exists")]
    AlreadyInitialized,

    #[error("failed to read catalog: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("duplicate {tool} identity: {name}")]
    DuplicateIdentity { tool: Tool, name: String },

    #[error("unable to determine home directory")]
    NoHome,
}

/// Identity lookup errors.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("{tool} Identity Plugin::Lookup of identity '{name}' failed. Aborting build.")]
    NotFound { tool: Tool, name: String },

    #[error("{tool} identity already exists: {name} (use --force to overwrite)")]
    AlreadyExists { tool: Tool, name: String },

    #[error("{tool} identity is missing {field}")]
    MissingField { tool: Tool, field: &'static str },
}

/// Workspace file errors.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot delete {} folder: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write install script {}: {source}", .path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Secret sealing errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("armor failed: {0}")]
    ArmorFailed(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Controller key storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no controller key found in {0}")]
    NoPrivateKey(String),

    #[error("failed to read key: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write key: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("invalid key format: {0}")]
    InvalidFormat(String),
}

/// Script launch errors.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("shell not found: {0}")]
    ShellNotFound(String),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
