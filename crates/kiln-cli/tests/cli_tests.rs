//! End-to-end tests for the `kiln` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../template")
}

/// `kiln` run inside `cwd` with a pinned template and no ambient config.
fn kiln(cwd: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("kiln");
    cmd.current_dir(cwd)
        .env("KILN_TEMPLATE_DIR", template_dir())
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env("HOME", cwd)
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .arg("--no-color");
    cmd
}

fn manifest_name(project: &Path) -> String {
    let raw = fs::read_to_string(project.join("package.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    json["name"].as_str().unwrap().to_string()
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-install"))
        .stdout(predicate::str::contains("--git"))
        .stdout(predicate::str::contains("--template"));
}

#[test]
fn test_version_flags() {
    let temp = TempDir::new().unwrap();
    for flag in ["--version", "-v"] {
        kiln(temp.path())
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_missing_name_prints_usage() {
    let temp = TempDir::new().unwrap();
    cargo::cargo_bin_cmd!("kiln")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_template_is_usage_error() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my-api", "--template", "huge"])
        .assert()
        .code(2);
    assert!(!temp.path().join("my-api").exists());
}

#[test]
fn test_scaffold_without_install() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my-api", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 'my-api'"))
        .stdout(predicate::str::contains("npm install"));

    let project = temp.path().join("my-api");
    assert_eq!(manifest_name(&project), "my-api");

    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.contains("my-api"));
    assert!(!readme.contains("{{"));

    assert!(project.join("src/index.js").is_file());
    assert!(project.join(".env.example").is_file());
    assert!(!project.join("node_modules").exists());
}

#[test]
fn test_reserved_name_fails_without_writing() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["node_modules", "--no-install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("reserved"));
    assert!(!temp.path().join("node_modules").exists());
}

#[test]
fn test_invalid_characters_fail() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my api!", "--no-install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only letters, digits"));
}

#[test]
fn test_non_empty_directory_is_refused() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("my-api");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("keep.txt"), "mine").unwrap();

    kiln(temp.path())
        .args(["my-api", "--no-install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not empty"))
        .stderr(predicate::str::contains("--verbose"));

    assert_eq!(fs::read_to_string(project.join("keep.txt")).unwrap(), "mine");
    assert!(!project.join("package.json").exists());
}

#[test]
fn test_verbose_failure_shows_stage() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("my-api");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("keep.txt"), "mine").unwrap();

    kiln(temp.path())
        .args(["my-api", "--no-install", "--verbose"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Stage: directory setup"))
        .stderr(predicate::str::contains("DirectoryNotEmpty"));
}

#[test]
fn test_empty_directory_is_reused() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("my-api")).unwrap();

    kiln(temp.path())
        .args(["my-api", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("existing empty directory"));
    assert_eq!(manifest_name(&temp.path().join("my-api")), "my-api");
}

#[test]
fn test_missing_package_manager_is_a_warning() {
    let temp = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();

    kiln(temp.path())
        .env("PATH", empty_path.path())
        .arg("my-api")
        .assert()
        .success()
        .stderr(predicate::str::contains("was not found on PATH"))
        .stderr(predicate::str::contains("cd my-api && npm install"));

    let project = temp.path().join("my-api");
    assert_eq!(manifest_name(&project), "my-api");
    assert!(!project.join("node_modules").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my-api", "--dry-run", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("package.json"))
        .stdout(predicate::str::contains("will be created"));
    assert!(!temp.path().join("my-api").exists());
}

#[test]
fn test_dry_run_still_validates() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["src", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("reserved"));
}

#[test]
fn test_missing_template_dir_fails() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my-api", "--no-install", "--template-dir"])
        .arg(temp.path().join("no-such-template"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
    assert!(!temp.path().join("my-api").join("package.json").exists());
}

#[test]
fn test_config_file_disables_install() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("kiln.toml");
    fs::write(&config, "[defaults]\ninstall = false\n").unwrap();
    let empty_path = TempDir::new().unwrap();

    kiln(temp.path())
        .env("PATH", empty_path.path())
        .arg("my-api")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("was not found").not());
}

#[test]
fn test_missing_config_file_fails() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my-api", "--config", "absent.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
    assert!(!temp.path().join("my-api").exists());
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my-api", "--no-install", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    let temp = TempDir::new().unwrap();
    kiln(temp.path())
        .args(["my-api", "--quiet", "--verbose"])
        .assert()
        .code(2);
}
