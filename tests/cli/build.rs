//! Tests for `setup`, `run`, `cleanup` and `build`.

use crate::support::*;

#[test]
fn test_setup_materializes_chef_identity() {
    let t = Test::with_identities();

    let output = t.setup("chef", "prod");
    assert_success(&output);
    assert_stdout_contains(&output, "Running build with Chef Identity of prod");

    assert_eq!(t.read_ws(".chef/.jenkinsChefIdentity"), "prod");
    assert_eq!(t.read_ws(".chef/user.pem"), PROD.key);
    assert_eq!(t.read_ws(".chef/knife.rb"), PROD.config);

    let script = t.read_ws("install-chef-cookbook.sh");
    let expected = format!(
        "cd /cb\nberks vendor ../\ncd {}\nsudo chef gem install knife-zero\n\
         knife zero bootstrap 10.0.0.5 --ssh-user deploy --sudo --identity-file .chef/user.pem --local-mode --run-list 'recipe[a]' --overwrite\n",
        t.dir.path().display()
    );
    assert_eq!(script, expected);
    assert_no_leak(&output, "PRODKEY");
}

#[test]
fn test_setup_is_idempotent() {
    let t = Test::with_identities();

    assert_success(&t.setup("chef", "prod"));
    let output = t.setup("chef", "prod");
    assert_success(&output);
    assert_stdout_contains(&output, "already up to date");
}

#[test]
fn test_setup_switches_identity() {
    let t = Test::with_identities();
    assert_success(&t.add_chef(STAGING));

    assert_success(&t.setup("chef", "prod"));
    let output = t.setup("chef", "staging");
    assert_success(&output);
    assert_stdout_contains(
        &output,
        "Job's existing Chef Identity did not match.  Changing to staging",
    );

    assert_eq!(t.read_ws(".chef/.jenkinsChefIdentity"), "staging");
    assert_eq!(t.read_ws(".chef/user.pem"), STAGING.key);
    // the script is written once and then left alone
    assert!(t.read_ws("install-chef-cookbook.sh").contains("10.0.0.5"));
}

#[test]
fn test_setup_cinc_has_no_script() {
    let t = Test::with_identities();

    assert_success(&t.setup("cinc", "edge"));
    assert_eq!(t.read_ws(".cinc/.jenkinsCincIdentity"), "edge");
    assert_eq!(t.read_ws(".cinc/user.pem"), EDGE.key);
    assert!(!t.ws("install-chef-cookbook.sh").exists());
    assert!(!t.ws(".chef").exists());
}

#[test]
fn test_cleanup_removes_secrets() {
    let t = Test::with_identities();
    assert_success(&t.setup("chef", "prod"));

    let output = t.cleanup("chef");
    assert_success(&output);
    assert_stdout_contains(&output, "Chef Identity cleanup happening...");
    assert_stdout_contains(&output, ".chef folder removed");
    assert!(!t.ws(".chef").exists());
    assert!(t.ws("install-chef-cookbook.sh").exists());

    let output = t.cleanup("chef");
    assert_success(&output);
    assert_stdout_contains(&output, "nothing to clean");
}

#[cfg(unix)]
#[test]
fn test_build_runs_script_and_cleans_up() {
    let t = Test::with_identities();
    t.stub_script("test -f .chef/user.pem && test \"$JOB\" = deploy-7\n");

    let output = t
        .cmd()
        .args(["build", "--identity", "prod", "--env", "JOB=deploy-7", "--workspace"])
        .arg(t.dir.path())
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "Chef cookbook installation starting");
    assert_stdout_contains(&output, "build succeeded");
    assert!(!t.ws(".chef").exists());
}

#[cfg(unix)]
#[test]
fn test_failed_script_fails_build_but_cleans_up() {
    let t = Test::with_identities();
    t.stub_script("exit 4\n");

    let output = t.build("chef", "prod");

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "build failed");
    assert!(!t.ws(".chef").exists());
}

#[test]
fn test_build_with_unknown_identity_aborts() {
    let t = Test::with_identities();

    let output = t.build("cinc", "nope");

    assert_exit_code(&output, 2);
    assert!(!t.ws(".cinc").exists());
}

#[test]
fn test_cinc_build_needs_no_shell() {
    let t = Test::with_identities();

    let output = t.build("cinc", "edge");
    assert_success(&output);
    assert_stdout_contains(&output, ".cinc folder removed");
    assert!(!t.ws(".cinc").exists());
}

#[cfg(unix)]
#[test]
fn test_run_without_script_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .arg("run")
        .arg("--workspace")
        .arg(t.dir.path())
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
}

#[cfg(unix)]
#[test]
fn test_run_uses_workspace_env_var() {
    let t = Test::new();
    t.stub_script("exit 0\n");

    let output = t
        .cmd()
        .arg("run")
        .env("WORKSPACE", t.dir.path())
        .output()
        .unwrap();
    assert_success(&output);
}
