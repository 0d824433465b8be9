//! Build driver.
//!
//! Runs one build against one workspace:
//!
//! 1. **setup**: resolve the identity, reconcile the workspace, write the
//!    Chef install script if missing.
//! 2. **perform**: run the install script (Chef only).
//! 3. **teardown**: remove the secret directory. Always runs, whatever
//!    happened before.

use std::collections::BTreeMap;
use std::sync::Arc;

use age::x25519;
use tracing::{debug, warn};

use crate::core::domain::Catalog;
use crate::core::launch::Launcher;
use crate::core::log::BuildLog;
use crate::core::registry::Registry;
use crate::core::resolve::resolve;
use crate::core::tool::Tool;
use crate::core::workspace::{Cleaned, LocalFs, Reconciled, ScriptStatus, Workspace, WorkspaceFs};
use crate::error::{Error, Result, Severity};

/// Final state of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    /// The build failed; finalization still ran.
    Failure,
    /// The build was stopped: identity missing or secrets left on disk.
    Aborted,
}

impl BuildOutcome {
    /// Outcome of a [`Build::run`] result.
    pub fn of(result: &Result<bool>) -> Self {
        match result {
            Ok(true) => BuildOutcome::Success,
            Ok(false) => BuildOutcome::Failure,
            Err(e) => match e.severity() {
                Severity::Abort => BuildOutcome::Aborted,
                Severity::Failure => BuildOutcome::Failure,
            },
        }
    }

    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            BuildOutcome::Success => 0,
            BuildOutcome::Failure => 1,
            BuildOutcome::Aborted => 2,
        }
    }
}

/// Result of the setup phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prepared {
    pub reconciled: Reconciled,
    /// `None` for tools without a script.
    pub script: Option<ScriptStatus>,
}

/// One build over one workspace.
pub struct Build<'a, F: WorkspaceFs = LocalFs> {
    catalog: Arc<Catalog>,
    key: &'a x25519::Identity,
    workspace: Workspace<F>,
    log: &'a dyn BuildLog,
}

impl<'a> Build<'a, LocalFs> {
    /// Start a build against the registry's current catalog.
    ///
    /// The catalog is snapshotted here; a save during the build does not
    /// change which identities this build sees.
    pub fn new(registry: &'a Registry, workspace: Workspace<LocalFs>, log: &'a dyn BuildLog) -> Self {
        Self::from_parts(registry.snapshot(), registry.key().as_age(), workspace, log)
    }
}

impl<'a, F: WorkspaceFs> Build<'a, F> {
    pub fn from_parts(
        catalog: Arc<Catalog>,
        key: &'a x25519::Identity,
        workspace: Workspace<F>,
        log: &'a dyn BuildLog,
    ) -> Self {
        Self {
            catalog,
            key,
            workspace,
            log,
        }
    }

    pub fn workspace(&self) -> &Workspace<F> {
        &self.workspace
    }

    /// Resolve `name` and materialize its secrets.
    ///
    /// # Errors
    ///
    /// `IdentityError::NotFound` before any file is touched (abort), or a
    /// `WorkspaceError` from reconciling or writing the script (failure).
    pub fn setup(&self, tool: Tool, name: &str) -> Result<Prepared> {
        self.log
            .line(&format!("Running build with {} Identity of {}", tool, name));

        let prepared = match tool {
            Tool::Chef => {
                let identity = resolve(&self.catalog.chef, name).map_err(|e| self.report(e))?;
                let reconciled = self.workspace.reconcile(identity, self.key, self.log)?;
                let script = self.workspace.write_script(identity)?;
                Prepared {
                    reconciled,
                    script: Some(script),
                }
            }
            Tool::Cinc => {
                let identity = resolve(&self.catalog.cinc, name).map_err(|e| self.report(e))?;
                let reconciled = self.workspace.reconcile(identity, self.key, self.log)?;
                Prepared {
                    reconciled,
                    script: None,
                }
            }
        };

        debug!(tool = %tool, name = %name, ?prepared, "setup complete");
        Ok(prepared)
    }

    /// Run the Chef install script. Returns whether it exited with 0.
    pub fn perform(&self, launcher: &dyn Launcher, env: &BTreeMap<String, String>) -> bool {
        install_cookbooks(&self.workspace, launcher, env, self.log)
    }

    /// Remove the tool's secret directory.
    ///
    /// # Errors
    ///
    /// `WorkspaceError::Cleanup` if the directory could not be removed; the
    /// caller must abort.
    pub fn teardown(&self, tool: Tool) -> Result<Cleaned> {
        finalize(&self.workspace, tool, self.log)
    }

    /// Setup, perform (Chef only) and teardown, in that order.
    ///
    /// Teardown runs even when setup or the script failed. A teardown
    /// error replaces any earlier result, since leftover secrets abort the
    /// build regardless of how it went.
    ///
    /// Returns `Ok(true)` when every step succeeded, `Ok(false)` when the
    /// script ran but failed.
    pub fn run(
        &self,
        tool: Tool,
        name: &str,
        launcher: &dyn Launcher,
        env: &BTreeMap<String, String>,
    ) -> Result<bool> {
        let result = self.setup(tool, name).map(|_| match tool {
            Tool::Chef => self.perform(launcher, env),
            Tool::Cinc => true,
        });

        match self.teardown(tool) {
            Ok(_) => result,
            Err(cleanup) => {
                if let Err(earlier) = &result {
                    warn!(error = %earlier, "build error superseded by cleanup failure");
                }
                Err(cleanup)
            }
        }
    }

    /// Echo an error into the build log and hand it back.
    fn report(&self, e: Error) -> Error {
        self.log.line(&e.to_string());
        e
    }
}

/// Run the Chef install script in `workspace`.
///
/// Needs no identity: the script and secrets were put in place by setup.
/// Returns whether the script exited with 0; launch errors are logged and
/// count as failure.
pub fn install_cookbooks<F: WorkspaceFs>(
    workspace: &Workspace<F>,
    launcher: &dyn Launcher,
    env: &BTreeMap<String, String>,
    log: &dyn BuildLog,
) -> bool {
    log.line("Chef cookbook installation starting");

    let (Some(root), Some(script)) = (workspace.root(), Tool::Chef.script_name()) else {
        log.line("Chef cookbook installation error: no workspace to run in");
        return false;
    };

    match launcher.launch(script, root, env) {
        Ok(code) => {
            debug!(code, "install script finished");
            code == 0
        }
        Err(e) => {
            warn!(error = %e, "install script could not be launched");
            log.line(&format!("Chef cookbook installation error: {}", e));
            false
        }
    }
}

/// Remove `tool`'s secret directory from `workspace`, logging the result.
///
/// # Errors
///
/// `WorkspaceError::Cleanup` if the directory could not be removed.
pub fn finalize<F: WorkspaceFs>(workspace: &Workspace<F>, tool: Tool, log: &dyn BuildLog) -> Result<Cleaned> {
    log.line(&format!("{} Identity cleanup happening...", tool));

    match workspace.cleanup(tool) {
        Ok(Cleaned::Removed) => {
            log.line(&format!("{} folder removed", tool.dir_name()));
            Ok(Cleaned::Removed)
        }
        Ok(Cleaned::Nothing) => Ok(Cleaned::Nothing),
        Err(e) => {
            log.line(&e.to_string());
            Err(e)
        }
    }
}
