//! Marker-driven secret materialization.

use std::path::{Path, PathBuf};

use age::x25519;
use tracing::{debug, info};

use super::{Workspace, WorkspaceFs};
use crate::core::constants;
use crate::core::domain::ToolIdentity;
use crate::core::log::BuildLog;
use crate::error::{Result, WorkspaceError};

/// What [`Workspace::reconcile`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The workspace already held this identity, or has no root.
    NoOp,
    /// Secret files and marker were (re)written.
    Rewritten,
}

impl<F: WorkspaceFs> Workspace<F> {
    /// Make the workspace hold `identity`'s secrets.
    ///
    /// If the marker already names `identity`, nothing is touched. Any other
    /// state (marker missing, unreadable, or naming another identity) leads
    /// to a full rewrite: tool directory, private key, config, and finally
    /// the marker. Writing the marker last means an interrupted rewrite
    /// leaves a stale or missing marker, so the next build rewrites again.
    ///
    /// Secrets are unsealed with `key` only when a rewrite is needed.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::Write` if any directory or file write fails.
    pub fn reconcile<I: ToolIdentity>(
        &self,
        identity: &I,
        key: &x25519::Identity,
        log: &dyn BuildLog,
    ) -> Result<Reconciled> {
        let tool = I::TOOL;
        let (Some(dir), Some(marker)) = (self.tool_dir(tool), self.marker_path(tool)) else {
            debug!(tool = %tool, "no workspace, skipping reconcile");
            return Ok(Reconciled::NoOp);
        };

        match self.fs.read_to_string(&marker) {
            Ok(current) if current == identity.name() => {
                debug!(tool = %tool, name = %identity.name(), "workspace identity matches");
                return Ok(Reconciled::NoOp);
            }
            Ok(current) => {
                debug!(tool = %tool, previous = %current, "workspace identity differs");
                log.line(&format!(
                    "Job's existing {} Identity did not match.  Changing to {}",
                    tool,
                    identity.name()
                ));
            }
            Err(e) => {
                debug!(tool = %tool, error = %e, "no readable workspace marker");
            }
        }

        let materials = identity.unseal(key)?;

        self.fs.create_dir_all(&dir).map_err(write_error(&dir))?;

        let pem = dir.join(constants::PRIVATE_KEY_FILE);
        self.fs
            .write_private(&pem, &materials.private_key)
            .map_err(write_error(&pem))?;

        let config = dir.join(constants::CONFIG_FILE);
        self.fs
            .write_private(&config, &materials.config_file)
            .map_err(write_error(&config))?;

        self.fs
            .write(&marker, identity.name())
            .map_err(write_error(&marker))?;

        info!(tool = %tool, name = %identity.name(), "workspace secrets rewritten");
        Ok(Reconciled::Rewritten)
    }
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> WorkspaceError {
    let path: PathBuf = path.to_path_buf();
    move |source| WorkspaceError::Write { path, source }
}
