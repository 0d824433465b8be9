//! Build workspace.
//!
//! A workspace is the directory one build owns for its duration. Identity
//! secrets are materialized under `<root>/.chef` (or `.cinc`) and removed
//! again when the build finishes.
//!
//! ```text
//! <root>/.chef/.jenkinsChefIdentity   marker: identity name
//! <root>/.chef/user.pem               private key
//! <root>/.chef/knife.rb               knife configuration
//! <root>/install-chef-cookbook.sh     bootstrap script, created once
//! ```
//!
//! A workspace without a root is valid: every operation on it is a no-op.

mod cleanup;
mod reconcile;
mod script;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use cleanup::Cleaned;
pub use reconcile::Reconciled;
pub use script::{render, ScriptStatus};

use crate::core::constants;
use crate::core::tool::Tool;

/// File operations a workspace needs.
///
/// Implemented for the local filesystem by [`LocalFs`]; tests substitute
/// their own to observe or fail individual operations.
pub trait WorkspaceFs {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` and write `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Like [`write`](Self::write), but readable by the owner only.
    fn write_private(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl WorkspaceFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn write_private(&self, path: &Path, contents: &str) -> io::Result<()> {
        use std::io::Write;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        file.write_all(contents.as_bytes())?;

        // mode() only applies on creation; tighten files left by older runs
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// One build's workspace.
#[derive(Debug, Clone)]
pub struct Workspace<F = LocalFs> {
    root: Option<PathBuf>,
    fs: F,
}

impl Workspace<LocalFs> {
    /// Workspace on the local filesystem.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root, fs: LocalFs }
    }
}

impl<F: WorkspaceFs> Workspace<F> {
    /// Workspace backed by a custom file API.
    pub fn with_fs(root: Option<PathBuf>, fs: F) -> Self {
        Self { root, fs }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// `<root>/.chef` or `<root>/.cinc`.
    pub fn tool_dir(&self, tool: Tool) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(tool.dir_name()))
    }

    /// Marker file recording which identity is materialized.
    pub fn marker_path(&self, tool: Tool) -> Option<PathBuf> {
        self.tool_dir(tool).map(|d| d.join(tool.marker_name()))
    }

    pub fn private_key_path(&self, tool: Tool) -> Option<PathBuf> {
        self.tool_dir(tool)
            .map(|d| d.join(constants::PRIVATE_KEY_FILE))
    }

    pub fn config_path(&self, tool: Tool) -> Option<PathBuf> {
        self.tool_dir(tool).map(|d| d.join(constants::CONFIG_FILE))
    }

    /// Bootstrap script path, for tools that have one.
    pub fn script_path(&self, tool: Tool) -> Option<PathBuf> {
        let name = tool.script_name()?;
        self.root.as_ref().map(|r| r.join(name))
    }
}
