//! Build log sink.
//!
//! Human-readable progress lines shown to whoever watches the build. These
//! are separate from `tracing` diagnostics, and never carry secret values.

use std::sync::Mutex;

/// Receives build progress lines.
pub trait BuildLog {
    fn line(&self, msg: &str);
}

/// Forwards build lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl BuildLog for TracingLog {
    fn line(&self, msg: &str) {
        tracing::info!(target: "chef_identity::build", "{}", msg);
    }
}

/// Keeps build lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines logged so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl BuildLog for MemoryLog {
    fn line(&self, msg: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(msg.to_string()),
            Err(poisoned) => poisoned.into_inner().push(msg.to_string()),
        }
    }
}

impl<L: BuildLog + ?Sized> BuildLog for &L {
    fn line(&self, msg: &str) {
        (**self).line(msg)
    }
}
