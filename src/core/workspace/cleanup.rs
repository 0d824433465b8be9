//! Secret directory removal.

use tracing::{debug, error, info};

use super::{Workspace, WorkspaceFs};
use crate::core::tool::Tool;
use crate::error::{Result, WorkspaceError};

/// What [`Workspace::cleanup`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleaned {
    Removed,
    /// Nothing to remove: no root, no workspace, or no tool directory.
    Nothing,
}

impl<F: WorkspaceFs> Workspace<F> {
    /// Delete the tool directory and everything under it, or the plain file
    /// that sits at its path.
    ///
    /// Safe to call any number of times; a missing workspace or directory
    /// counts as clean.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::Cleanup` if the directory exists but cannot
    /// be removed. Leftover key material is a security problem, so callers
    /// must abort rather than carry on.
    pub fn cleanup(&self, tool: Tool) -> Result<Cleaned> {
        let Some(root) = self.root() else {
            return Ok(Cleaned::Nothing);
        };
        if !self.fs.exists(root) {
            debug!(root = %root.display(), "workspace does not exist");
            return Ok(Cleaned::Nothing);
        }

        let dir = root.join(tool.dir_name());
        if !self.fs.exists(&dir) {
            debug!(path = %dir.display(), "nothing to clean");
            return Ok(Cleaned::Nothing);
        }

        // a plain file in the directory's place goes too
        let removed = if self.fs.is_dir(&dir) {
            self.fs.remove_dir_all(&dir)
        } else {
            self.fs.remove_file(&dir)
        };
        if let Err(source) = removed {
            error!(path = %dir.display(), error = %source, "cleanup failed");
            return Err(WorkspaceError::Cleanup { path: dir, source }.into());
        }

        info!(path = %dir.display(), "secret directory removed");
        Ok(Cleaned::Removed)
    }
}
