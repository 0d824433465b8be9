//! Chef bootstrap script.

use tracing::{debug, info};

use super::{Workspace, WorkspaceFs};
use crate::core::domain::{ChefIdentity, ToolIdentity};
use crate::core::tool::Tool;
use crate::error::{Result, WorkspaceError};

/// What [`Workspace::write_script`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    Written,
    /// A script was already there and was left alone.
    Kept,
    /// No workspace root.
    Skipped,
}

/// Render the install script for `identity`.
///
/// Fields are interpolated as-is; they come from the administrator's
/// catalog, not from build input.
pub fn render(identity: &ChefIdentity, workspace_path: &str) -> String {
    [
        format!("cd {}", identity.cookbook_path()),
        "berks vendor ../".to_string(),
        format!("cd {}", workspace_path),
        "sudo chef gem install knife-zero".to_string(),
        format!(
            "knife zero bootstrap {} --ssh-user {} --sudo --identity-file {}/user.pem --local-mode --run-list '{}' --overwrite",
            identity.remote_host(),
            identity.remote_account(),
            Tool::Chef.dir_name(),
            identity.run_list()
        ),
    ]
    .iter()
    .fold(String::new(), |mut script, line| {
        script.push_str(line);
        script.push('\n');
        script
    })
}

impl<F: WorkspaceFs> Workspace<F> {
    /// Write the install script unless the workspace already has one.
    ///
    /// An existing script is never compared or overwritten, so jobs may
    /// customize it after the first build.
    pub fn write_script(&self, identity: &ChefIdentity) -> Result<ScriptStatus> {
        let (Some(root), Some(path)) = (self.root(), self.script_path(Tool::Chef)) else {
            return Ok(ScriptStatus::Skipped);
        };

        if self.fs.exists(&path) {
            debug!(path = %path.display(), "install script exists, keeping it");
            return Ok(ScriptStatus::Kept);
        }

        let script = render(identity, &root.display().to_string());
        self.fs
            .write(&path, &script)
            .map_err(|source| WorkspaceError::Script {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), name = %identity.name(), "install script written");
        Ok(ScriptStatus::Written)
    }
}
