//! Build commands.
//!
//! `setup`, `run` and `cleanup` map to the three phases of a build so a CI
//! job can call them as separate steps; `build` runs all three and always
//! cleans up.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{output, Target};
use crate::core::build::{self, Build, BuildOutcome};
use crate::core::launch::ShellLauncher;
use crate::core::log::{BuildLog, TracingLog};
use crate::core::registry::Registry;
use crate::core::tool::Tool;
use crate::core::workspace::{Cleaned, Reconciled, Workspace};
use crate::error::{Error, Result};

/// Prints build lines to stdout and records them as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLog;

impl BuildLog for ConsoleLog {
    fn line(&self, msg: &str) {
        output::step(msg);
        TracingLog.line(msg);
    }
}

/// Materialize an identity into the workspace.
pub fn setup(home: &Path, target: &Target) -> Result<()> {
    let registry = Registry::open(home)?;
    let root = workspace_root(target.workspace.workspace.clone());
    let log = ConsoleLog;
    let build = Build::new(&registry, Workspace::new(root), &log);

    let prepared = build
        .setup(target.tool, &target.identity)
        .map_err(Error::logged)?;
    match prepared.reconciled {
        Reconciled::Rewritten => output::success(&format!(
            "{} identity {} written",
            target.tool.as_str(),
            output::name(&target.identity)
        )),
        Reconciled::NoOp => output::dimmed("workspace already up to date"),
    }
    Ok(())
}

/// Run the install script in the workspace.
pub fn run(workspace: Option<PathBuf>, env: Vec<(String, String)>) -> Result<()> {
    let workspace = Workspace::new(workspace_root(workspace));
    let env: BTreeMap<_, _> = env.into_iter().collect();

    if build::install_cookbooks(&workspace, &ShellLauncher::new(), &env, &ConsoleLog) {
        output::success("cookbook installation finished");
        Ok(())
    } else {
        Err(Error::Other("Chef cookbook installation failed".to_string()))
    }
}

/// Remove an identity's secrets from the workspace.
pub fn cleanup(tool: Tool, workspace: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::new(workspace_root(workspace));

    match build::finalize(&workspace, tool, &ConsoleLog).map_err(Error::logged)? {
        Cleaned::Removed => output::success("secrets removed"),
        Cleaned::Nothing => output::dimmed("nothing to clean"),
    }
    Ok(())
}

/// Setup, run and cleanup.
pub fn build(home: &Path, target: &Target, env: Vec<(String, String)>) -> Result<()> {
    let registry = Registry::open(home)?;
    let root = workspace_root(target.workspace.workspace.clone());
    let env: BTreeMap<_, _> = env.into_iter().collect();
    let log = ConsoleLog;
    let driver = Build::new(&registry, Workspace::new(root), &log);

    let result = driver.run(target.tool, &target.identity, &ShellLauncher::new(), &env);
    let outcome = BuildOutcome::of(&result);
    info!(?outcome, "build finished");

    if result.map_err(Error::logged)? {
        output::success("build succeeded");
        Ok(())
    } else {
        Err(Error::Other("build failed".to_string()))
    }
}

/// Missing workspace means every workspace step is skipped.
fn workspace_root(workspace: Option<PathBuf>) -> Option<PathBuf> {
    if workspace.is_none() {
        output::warn("no workspace given; nothing will be written");
    }
    workspace
}
