//! Script launching.
//!
//! The bootstrap script runs as an external process; the core only decides
//! what to run and where.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{LaunchError, Result};

/// Runs a script inside a workspace.
pub trait Launcher {
    /// Run `script` (relative to `cwd`) and return its exit code.
    ///
    /// `env` is added on top of the inherited environment.
    fn launch(&self, script: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<i32>;
}

/// Runs scripts with `sh` from `PATH`.
#[derive(Debug, Default, Clone)]
pub struct ShellLauncher {
    shell: Option<String>,
}

impl ShellLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `shell` instead of looking up `sh`.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: Some(shell.into()),
        }
    }
}

impl Launcher for ShellLauncher {
    fn launch(&self, script: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<i32> {
        let shell = self.shell.as_deref().unwrap_or("sh");
        let program = which::which(shell).map_err(|_| LaunchError::ShellNotFound(shell.to_string()))?;
        debug!(shell = %program.display(), script = %script, cwd = %cwd.display(), "launching");

        let status = Command::new(&program)
            .arg(script)
            .current_dir(cwd)
            .envs(env)
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        // killed by a signal: no code, report as failure
        Ok(status.code().unwrap_or(1))
    }
}
