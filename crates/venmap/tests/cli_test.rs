//! Integration tests for the `venmap` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `venmap` binary with env isolation.
///
/// Clears all `VENMAP_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn venmap_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("venmap");
    cmd.env("HOME", "/tmp/venmap-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/venmap-cli-test-nonexistent")
        .env_remove("VENMAP_PROFILE")
        .env_remove("VENMAP_SERVER")
        .env_remove("VENMAP_EMAIL")
        .env_remove("VENMAP_PASSWORD")
        .env_remove("VENMAP_TOKEN")
        .env_remove("VENMAP_OUTPUT")
        .env_remove("VENMAP_INSECURE")
        .env_remove("VENMAP_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = venmap_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("Usage"),
        "Expected 'Usage' in output:\n{text}"
    );
}

#[test]
fn test_help_flag() {
    venmap_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("venue")
            .and(predicate::str::contains("projects"))
            .and(predicate::str::contains("venues"))
            .and(predicate::str::contains("clients")),
    );
}

#[test]
fn test_version_flag() {
    venmap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("venmap"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    venmap_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    venmap_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    venmap_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = venmap_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_projects_list_no_config() {
    venmap_cmd()
        .args(["projects", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("server"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    venmap_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_invalid_output_format() {
    let output = venmap_cmd()
        .args(["--output", "invalid", "projects", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about
    // missing backend config, not about argument parsing.
    venmap_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--insecure",
            "--timeout",
            "60",
            "projects",
            "list",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("server"))
                .or(predicate::str::contains("profile")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_projects_subcommands_exist() {
    venmap_cmd()
        .args(["projects", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("venues"))
                .and(predicate::str::contains("proposal"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_project_venues_subcommands_exist() {
    venmap_cmd()
        .args(["projects", "venues", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("add")
                .and(predicate::str::contains("remove"))
                .and(predicate::str::contains("set-status"))
                .and(predicate::str::contains("describe")),
        );
}

#[test]
fn test_venues_subcommands_exist() {
    venmap_cmd()
        .args(["venues", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("import"))
                .and(predicate::str::contains("template"))
                .and(predicate::str::contains("photos")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    venmap_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

#[test]
fn test_venue_list_filter_flags_parse() {
    // Filter flags must parse; failure should only be about config.
    venmap_cmd()
        .args([
            "venues",
            "list",
            "--city",
            "Paris",
            "--min-capacity",
            "100",
            "--facility",
            "WiFi",
            "--event-type",
            "conference",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("server"))
                .or(predicate::str::contains("profile")),
        );
}
