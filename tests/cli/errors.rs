//! Error reporting and exit codes.

use crate::support::*;

#[test]
fn test_uninitialized_suggests_init() {
    let t = Test::new();

    let output = t.list();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "not initialized");
    assert_stderr_contains(&output, "chef-identity init");
}

#[test]
fn test_unknown_identity_exits_with_abort_code() {
    let t = Test::with_identities();

    let output = t.setup("chef", "c");
    assert_exit_code(&output, 2);
    assert_stdout_contains(&output, "Chef Identity Plugin::Lookup of identity 'c' failed. Aborting build.");
    assert_stderr_contains(&output, "chef-identity identity list");
    assert!(!t.ws(".chef").exists());
    assert!(!t.ws("install-chef-cookbook.sh").exists());
}

#[test]
fn test_build_abort_is_printed_once() {
    let t = Test::with_identities();

    let output = t.build("chef", "c");
    assert_exit_code(&output, 2);

    let combined = format!("{}{}", stdout(&output), stderr(&output));
    assert_eq!(combined.matches("Lookup of identity 'c' failed").count(), 1);
}

#[test]
fn test_rm_unknown_identity_still_prints_error() {
    let t = Test::with_identities();

    let output = t.cmd().args(["identity", "rm", "nope", "--yes"]).output().unwrap();
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "Lookup of identity 'nope' failed");
}

#[test]
fn test_missing_key_file() {
    let t = Test::init();

    let output = t
        .cmd()
        .args([
            "identity",
            "add",
            "cinc",
            "x",
            "--key-file",
            "/nonexistent/key.pem",
            "--config-file",
            "/nonexistent/client.rb",
        ])
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
}

#[test]
fn test_malformed_catalog() {
    let t = Test::init();
    std::fs::write(t.identity_home().join("identities.toml"), "not [valid toml").unwrap();

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse catalog");
}

#[test]
fn test_bad_env_pair_is_rejected() {
    let t = Test::with_identities();

    let output = t
        .cmd()
        .args(["build", "--identity", "prod", "--env", "NOEQUALS"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "KEY=VALUE");
}
