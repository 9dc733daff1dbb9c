//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "catalog-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("product catalog"),
        "Should show app description"
    );
    assert!(stdout.contains("list"), "Should show list command");
    assert!(stdout.contains("add"), "Should show add command");
    assert!(stdout.contains("favorite"), "Should show favorite command");
    assert!(stdout.contains("pending"), "Should show pending command");
    assert!(stdout.contains("sync"), "Should show sync command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "catalog-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("catalog"), "Should show binary name");
}

/// Test add command help
#[test]
fn test_add_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "catalog-cli", "--", "add", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Add help should succeed");
    assert!(stdout.contains("--name"), "Should show name option");
    assert!(
        stdout.contains("--product-type"),
        "Should show product-type option"
    );
    assert!(stdout.contains("--price"), "Should show price option");
    assert!(stdout.contains("--tax"), "Should show tax option");
    assert!(stdout.contains("--image"), "Should show image option");
}

/// Test favorite command help
#[test]
fn test_favorite_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "catalog-cli", "--", "favorite", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Favorite help should succeed");
    assert!(stdout.contains("--name"), "Should show name option");
    assert!(
        stdout.contains("--product-type"),
        "Should show product-type option"
    );
}

/// Test format option
#[test]
fn test_format_option() {
    let output = Command::new("cargo")
        .args(["run", "-p", "catalog-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test missing required argument error handling
#[test]
fn test_add_missing_argument() {
    let output = Command::new("cargo")
        .args(["run", "-p", "catalog-cli", "--", "add", "--name", "Pen"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Missing argument should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required") || stderr.contains("error"),
        "Should show error about missing argument"
    );
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = Command::new("cargo")
        .args(["run", "-p", "catalog-cli", "--", "no-such-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}
