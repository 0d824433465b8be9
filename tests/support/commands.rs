//! Command helper methods for Test.

use super::{CincFixture, ChefFixture, Test};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a chef-identity command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and the catalog home set to the temporary home directory
    /// - Current directory set to the workspace
    /// - Colors and inherited log/workspace settings turned off
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("chef-identity").expect("failed to find chef-identity binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("CHEF_IDENTITY_HOME", self.identity_home());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("CHEF_IDENTITY_LOG");
        cmd.env_remove("WORKSPACE");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `chef-identity init`.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .arg("init")
            .output()
            .expect("failed to run chef-identity init")
    }

    /// Add a Chef identity from a fixture.
    pub fn add_chef(&self, f: ChefFixture) -> Output {
        self.add_chef_with(f, &[])
    }

    /// Add a Chef identity with extra flags such as `--force`.
    pub fn add_chef_with(&self, f: ChefFixture, extra: &[&str]) -> Output {
        let key = self.input(&format!("{}.pem", f.name), f.key);
        let config = self.input(&format!("{}.rb", f.name), f.config);
        self.cmd()
            .args(["identity", "add", "chef", f.name])
            .arg("--key-file")
            .arg(&key)
            .arg("--config-file")
            .arg(&config)
            .args([
                "--cookbook-path",
                f.cookbook_path,
                "--run-list",
                f.run_list,
                "--host",
                f.host,
                "--user",
                f.user,
            ])
            .args(extra)
            .output()
            .expect("failed to run chef-identity identity add")
    }

    /// Add a Cinc identity from a fixture.
    pub fn add_cinc(&self, f: CincFixture) -> Output {
        let key = self.input(&format!("{}.pem", f.name), f.key);
        let config = self.input(&format!("{}.rb", f.name), f.config);
        self.cmd()
            .args(["identity", "add", "cinc", f.name])
            .arg("--key-file")
            .arg(&key)
            .arg("--config-file")
            .arg(&config)
            .output()
            .expect("failed to run chef-identity identity add")
    }

    /// Shortcut for `chef-identity identity list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .args(["identity", "list"])
            .output()
            .expect("failed to run chef-identity identity list")
    }

    /// Shortcut for `chef-identity identity list --json`.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["identity", "list", "--json"])
            .output()
            .expect("failed to run chef-identity identity list --json")
    }

    /// Shortcut for `chef-identity identity show`.
    pub fn show(&self, tool: &str, name: &str) -> Output {
        self.cmd()
            .args(["identity", "show", name, "--tool", tool])
            .output()
            .expect("failed to run chef-identity identity show")
    }

    /// Shortcut for `chef-identity identity rm --yes`.
    pub fn rm(&self, tool: &str, name: &str) -> Output {
        self.cmd()
            .args(["identity", "rm", name, "--tool", tool, "--yes"])
            .output()
            .expect("failed to run chef-identity identity rm")
    }

    /// Shortcut for `chef-identity identity import`.
    pub fn import(&self, contents: &str) -> Output {
        let path = self.input("import.toml", contents);
        self.cmd()
            .args(["identity", "import"])
            .arg(&path)
            .output()
            .expect("failed to run chef-identity identity import")
    }

    /// Shortcut for `chef-identity setup` against the test workspace.
    pub fn setup(&self, tool: &str, name: &str) -> Output {
        self.cmd()
            .args(["setup", "--tool", tool, "--identity", name, "--workspace"])
            .arg(self.dir.path())
            .output()
            .expect("failed to run chef-identity setup")
    }

    /// Shortcut for `chef-identity build` against the test workspace.
    pub fn build(&self, tool: &str, name: &str) -> Output {
        self.cmd()
            .args(["build", "--tool", tool, "--identity", name, "--workspace"])
            .arg(self.dir.path())
            .output()
            .expect("failed to run chef-identity build")
    }

    /// Shortcut for `chef-identity cleanup` against the test workspace.
    pub fn cleanup(&self, tool: &str) -> Output {
        self.cmd()
            .args(["cleanup", "--tool", tool, "--workspace"])
            .arg(self.dir.path())
            .output()
            .expect("failed to run chef-identity cleanup")
    }
}
