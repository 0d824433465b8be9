//! Tests for `chef-identity identity`.

use crate::support::*;
use std::fs;

#[test]
fn test_add_and_list() {
    let t = Test::with_identities();

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "prod");
    assert_stdout_contains(&output, "edge");
}

#[test]
fn test_catalog_holds_no_plaintext() {
    let t = Test::with_identities();

    let contents = fs::read_to_string(t.identity_home().join("identities.toml")).unwrap();
    assert!(!contents.contains("PRODKEY"));
    assert!(!contents.contains("node_name"));
    assert!(contents.contains("BEGIN AGE ENCRYPTED FILE"));
    assert!(contents.contains("remote_host = \"10.0.0.5\""));
}

#[test]
fn test_list_json() {
    let t = Test::with_identities();

    let output = t.list_json();
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["identities"][0]["tool"], "chef");
    assert_eq!(json["identities"][0]["name"], "prod");
    assert_eq!(json["identities"][0]["remote_host"], "10.0.0.5");
    assert_eq!(json["identities"][1]["name"], "edge");
}

#[test]
fn test_list_filtered_by_tool() {
    let t = Test::with_identities();

    let output = t
        .cmd()
        .args(["identity", "list", "--tool", "cinc", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["identities"][0]["name"], "edge");
}

#[test]
fn test_list_empty() {
    let t = Test::init();

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "no identities");
}

#[test]
fn test_duplicate_add_needs_force() {
    let t = Test::with_identities();

    let output = t.add_chef(PROD);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");

    let output = t.add_chef_with(PROD, &["--force"]);
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&t.list_json())).unwrap();
    assert_eq!(json["count"], 2);
}

#[test]
fn test_same_name_in_both_tools_is_allowed() {
    let t = Test::init();
    assert_success(&t.add_cinc(CincFixture {
        name: "prod",
        key: "K",
        config: "C",
    }));
    assert_success(&t.add_chef(PROD));
}

#[test]
fn test_show_prints_fingerprints_only() {
    let t = Test::with_identities();

    let output = t.show("chef", "prod");
    assert_success(&output);
    assert_stdout_contains(&output, "sha256:");
    assert_stdout_contains(&output, "10.0.0.5");
    assert_stdout_contains(&output, "recipe[a]");
    assert_no_leak(&output, "PRODKEY");
    assert_no_leak(&output, "node_name");
}

#[test]
fn test_show_unknown_identity() {
    let t = Test::with_identities();

    let output = t.show("cinc", "prod");
    assert_failure(&output);
    assert_stderr_contains(&output, "Lookup of identity 'prod' failed");
}

#[test]
fn test_rm_removes_identity() {
    let t = Test::with_identities();

    let output = t.rm("chef", "prod");
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&t.list_json())).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["identities"][0]["name"], "edge");
}

#[test]
fn test_rm_missing_identity_fails() {
    let t = Test::init();

    let output = t.rm("chef", "ghost");
    assert_failure(&output);
}

#[test]
fn test_import_replaces_whole_catalog() {
    let t = Test::with_identities();

    let output = t.import(SAMPLE_IMPORT);
    assert_success(&output);
    assert_stdout_contains(&output, "imported");

    let json: serde_json::Value = serde_json::from_str(&stdout(&t.list_json())).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["identities"][0]["name"], "imported");
    assert_eq!(json["identities"][1]["name"], "imported-cinc");

    let contents = fs::read_to_string(t.identity_home().join("identities.toml")).unwrap();
    assert!(!contents.contains("IMPORTED-KEY"));
}

#[test]
fn test_import_with_duplicates_keeps_old_catalog() {
    let t = Test::with_identities();
    let doubled = "[[cinc]]\nname = \"x\"\nprivate_key = \"K\"\nconfig_file = \"C\"\n".repeat(2);

    let output = t.import(&doubled);
    assert_failure(&output);
    assert_stderr_contains(&output, "duplicate");

    let json: serde_json::Value = serde_json::from_str(&stdout(&t.list_json())).unwrap();
    assert_eq!(json["count"], 2);
}
