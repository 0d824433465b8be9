//! Test support utilities for chef-identity integration tests.
//!
//! Provides an isolated home and workspace per test plus command helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// No process-global state is mutated; child processes get their home and
/// workspace through flags and environment, so tests run in parallel.
pub struct Test {
    /// Build workspace
    pub dir: TempDir,
    /// Home directory; the catalog lives in `<home>/.chef-identity`
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with an initialized catalog.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Initialized environment holding the standard `prod` and `edge`
    /// identities.
    pub fn with_identities() -> Self {
        let t = Self::init();
        assert_success(&t.add_chef(PROD));
        assert_success(&t.add_cinc(EDGE));
        t
    }

    /// Catalog home passed to the binary.
    pub fn identity_home(&self) -> PathBuf {
        self.home.path().join(".chef-identity")
    }

    /// Write an input file outside the workspace and return its path.
    pub fn input(&self, name: &str, contents: &str) -> PathBuf {
        let dir = self.home.path().join("inputs");
        fs::create_dir_all(&dir).expect("failed to create inputs dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("failed to write input");
        path
    }

    /// Path inside the workspace.
    pub fn ws(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Read a workspace file.
    pub fn read_ws(&self, rel: &str) -> String {
        fs::read_to_string(self.ws(rel)).unwrap_or_else(|e| panic!("read {}: {}", rel, e))
    }

    /// Replace the install script with one that just succeeds.
    pub fn stub_script(&self, body: &str) {
        fs::write(self.ws("install-chef-cookbook.sh"), body).expect("failed to write script");
    }
}
