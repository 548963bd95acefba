#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the storelab-server binary.

use std::fs;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run_storelab_server(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_storelab-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute storelab-server")
}

#[test]
fn help_lists_subcommands() {
    let output = run_storelab_server(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    for sub in ["run", "check", "migrate", "seed"] {
        assert!(stdout.contains(sub), "missing subcommand {sub}");
    }
}

#[test]
fn version_matches_package() {
    let output = run_storelab_server(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn check_with_mock_database_succeeds() {
    let output = run_storelab_server(&["--mock", "check"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("sqlite::memory:"));
}

#[test]
fn print_config_applies_port_override() {
    let output = run_storelab_server(&["--mock", "--port", "9191", "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("9191"));
    assert!(stdout.contains("/api/linq"));
}

#[test]
fn config_file_values_are_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storelab.yaml");
    fs::write(
        &path,
        "server:\n  base_path: /linq\ndatabase:\n  dsn: \"sqlite::memory:\"\n",
    )
    .unwrap();

    let output = run_storelab_server(&["--config", path.to_str().unwrap(), "--print-config"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("/linq"));
}

#[test]
fn missing_config_file_fails() {
    let output = run_storelab_server(&["--config", "/definitely/not/here.yaml", "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let output = run_storelab_server(&["launch"]);

    assert!(!output.status.success());
}

#[test]
fn seed_against_file_database_inserts_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shop.db");
    let config = dir.path().join("storelab.yaml");
    fs::write(
        &config,
        format!("database:\n  path: \"{}\"\n", path.display()),
    )
    .unwrap();
    let config = config.to_str().unwrap();

    let first = run_storelab_server(&["--config", config, "seed"]);
    assert!(
        first.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&first.stderr)
    );
    assert!(String::from_utf8_lossy(&first.stdout).contains("Inserted"));

    let second = run_storelab_server(&["--config", config, "seed"]);
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stdout).contains("nothing inserted"));
}
