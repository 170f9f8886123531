//! CLI integration tests
//!
//! Every command runs with HOME pointed at a temp directory; commands that
//! need an instance talk to a local mock server.

use assert_cmd::Command;
use mockito::{Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the tcat binary with an isolated home directory
fn tcat(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tcat").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("TCAT_URL")
        .env_remove("TCAT_USERNAME")
        .env_remove("TCAT_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn mock_instance(server: &mut ServerGuard) -> Vec<mockito::Mock> {
    vec![
        server
            .mock("GET", "/api/")
            .match_header("authorization", "Basic dTpw")
            .with_status(200)
            .with_body("{}")
            .create(),
        server
            .mock("GET", "/api/querybin.php")
            .with_status(200)
            .with_body(r#"{"original_request": "querybin.php", "0": "climate", "1": "elections"}"#)
            .create(),
        server
            .mock("GET", "/api/querybin.php/climate")
            .with_status(200)
            .with_body(
                r#"{
                    "original_request": "querybin.php/climate",
                    "bin": "climate", "type": "track", "active": "1",
                    "comments": "COP summit", "notweets": "1200",
                    "mintime": "2019-12-01 00:00:00", "maxtime": "2019-12-03 06:00:00",
                    "nohashtags": "3", "nomentions": "1", "keywords": "cop25, climate"
                }"#,
            )
            .create(),
    ]
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inspect the query bins of a DMI-TCAT instance"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tcat"));
}

#[test]
fn test_bins_help() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["bins", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List the query bins"))
        .stdout(predicate::str::contains("--details"))
        .stdout(predicate::str::contains("--filter"));
}

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".tcat/config.toml"));
}

#[test]
fn test_config_set_and_show_masks_password() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["config", "set", "instance.password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("instance.password = ****"));

    tcat(&home)
        .args(["config", "set", "instance.url", "https://tcat.example.org"])
        .assert()
        .success();

    tcat(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://tcat.example.org"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["config", "set", "api.token", "x"])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_missing_url_is_reported() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .arg("ping")
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("TCAT URL not configured"));
}

#[test]
fn test_invalid_command() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_output_format_options() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["--output", "json", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exists\": false"));

    tcat(&home)
        .args(["--output", "invalid", "config", "path"])
        .assert()
        .failure();
}

#[test]
fn test_configured_output_format_is_default() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["config", "set", "output.format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set output.format = json"));

    tcat(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exists\": true"));

    tcat(&home)
        .args(["--output", "pretty", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exists: yes"));
}

#[test]
fn test_config_set_zero_timeout_is_rejected() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["config", "set", "client.timeout_secs", "0"])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    tcat(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tcat"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Against a mock instance
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ping() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mocks = mock_instance(&mut server);

    tcat(&home)
        .args(["--url", &server.url(), "--username", "u", "--password", "p", "ping"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connected to"));
}

#[test]
fn test_ping_unauthorized() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mock = server.mock("GET", "/api/").with_status(401).create();

    tcat(&home)
        .args(["--url", &server.url(), "--username", "u", "--password", "bad", "ping"])
        .assert()
        .failure()
        .code(77)
        .stderr(predicate::str::contains("HTTP 401"));
}

#[test]
fn test_bins_from_env() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mocks = mock_instance(&mut server);

    tcat(&home)
        .env("TCAT_URL", server.url())
        .env("TCAT_USERNAME", "u")
        .env("TCAT_PASSWORD", "p")
        .arg("bins")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bins (2)"))
        .stdout(predicate::str::contains("climate"))
        .stdout(predicate::str::contains("elections"));
}

#[test]
fn test_bins_filter_json() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mocks = mock_instance(&mut server);

    tcat(&home)
        .args(["--url", &server.url(), "--username", "u", "--password", "p"])
        .args(["--output", "json", "bins", "--filter", "ELECT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("elections"))
        .stdout(predicate::str::contains("climate").not());
}

#[test]
fn test_bin_show() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mocks = mock_instance(&mut server);

    tcat(&home)
        .args(["--url", &server.url(), "--username", "u", "--password", "p"])
        .args(["--output", "json", "bin", "climate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"track\""))
        .stdout(predicate::str::contains("\"notweets\": 1200"))
        .stdout(predicate::str::contains("\"cop25\""));
}

#[test]
fn test_bins_details() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mocks = mock_instance(&mut server);
    let elections = server
        .mock("GET", "/api/querybin.php/elections")
        .with_status(200)
        .with_body(
            r#"{
                "bin": "elections", "type": "follow", "active": "0",
                "comments": null, "notweets": "87",
                "mintime": null, "maxtime": null,
                "nohashtags": "0", "nomentions": "0", "keywords": ""
            }"#,
        )
        .expect(1)
        .create();

    tcat(&home)
        .args(["--url", &server.url(), "--username", "u", "--password", "p"])
        .args(["bins", "--details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("climate"))
        .stdout(predicate::str::contains("1200 tweets"))
        .stdout(predicate::str::contains("elections"))
        .stdout(predicate::str::contains("inactive"))
        .stdout(predicate::str::contains("87 tweets"));

    elections.assert();
}
