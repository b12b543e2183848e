//! Integration tests for `dockflow publish`.
//!
//! These tests cover the publish sequence, the existence guard and its
//! `--force` bypass, version overrides and failure handling.

#![cfg(unix)]

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn publish_env() -> TestEnv {
    let env = TestEnv::new();
    env.write_config(r#"{"image":"api","registry":"r.io"}"#);
    env.write_package(r#"{"name":"ignored","version":"1.0.0"}"#);
    env
}

// ============================================================================
// Sequence
// ============================================================================

/// Test the full publish sequence: probe, login, build, push version, push latest.
#[test]
fn test_publish_sequence() {
    let env = publish_env();

    env.command()
        .arg("publish")
        .assert()
        .success()
        .stdout(predicate::str::contains("CMD: "))
        .stdout(predicate::str::contains("Published r.io/api:1.0.0 and latest"));

    assert_eq!(
        env.docker_calls(),
        vec![
            "manifest inspect r.io/api:1.0.0",
            "login r.io",
            "build -f Dockerfile --build-arg BUILD_VERSION=1.0.0 \
             -t api:1.0.0 -t api:latest -t r.io/api:1.0.0 -t r.io/api:latest .",
            "push r.io/api:1.0.0",
            "push r.io/api:latest",
        ]
    );
}

/// Test that login, build and both pushes run in the --dir project.
#[test]
fn test_publish_runs_in_project_dir() {
    let env = publish_env();

    env.command()
        .current_dir(env.outside_dir())
        .arg("publish")
        .assert()
        .success();

    let dirs = env.docker_dirs();
    assert_eq!(dirs.len(), 5);
    assert!(dirs[1..].iter().all(|dir| *dir == env.canonical_project()));
}

/// Test that a Docker Hub namespace logs in to the default registry.
#[test]
fn test_publish_docker_hub_namespace() {
    let env = TestEnv::new();
    env.write_config(r#"{"image":"api","registry":"acme","version":"3.1.0"}"#);

    env.command().arg("publish").assert().success();

    let calls = env.docker_calls_without_probe();
    assert_eq!(calls[0], "login");
    assert_eq!(calls[2], "push acme/api:3.1.0");
}

// ============================================================================
// Guard
// ============================================================================

/// Test that an existing version blocks the publish before any command.
#[test]
fn test_publish_existing_version_blocked() {
    let env = publish_env();
    env.mark_published("r.io/api:1.0.0");

    env.command()
        .arg("publish")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("r.io/api:1.0.0 already exists"))
        .stdout(predicate::str::contains("CMD:").not());

    assert_eq!(env.docker_calls(), vec!["manifest inspect r.io/api:1.0.0"]);
}

/// Test that --force skips the probe and publishes anyway.
#[test]
fn test_publish_force_overwrites() {
    let env = publish_env();
    env.mark_published("r.io/api:1.0.0");

    env.command()
        .args(["publish", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published r.io/api:1.0.0 and latest"));

    let calls = env.docker_calls();
    assert!(!calls.iter().any(|c| c.starts_with("manifest")));
    assert_eq!(calls.len(), 4);
}

/// Test that the guard only looks at the version being published.
#[test]
fn test_publish_other_version_not_blocked() {
    let env = publish_env();
    env.mark_published("r.io/api:0.9.0");

    env.command().arg("publish").assert().success();
}

// ============================================================================
// Version overrides
// ============================================================================

/// Test the positional version override.
#[test]
fn test_publish_positional_version() {
    let env = publish_env();

    env.command()
        .args(["publish", "2.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published r.io/api:2.0.0 and latest"));

    assert!(env
        .docker_calls()
        .contains(&"push r.io/api:2.0.0".to_string()));
}

/// Test the --version flag override.
#[test]
fn test_publish_version_flag() {
    let env = publish_env();

    env.command()
        .args(["publish", "--version", "2.1.0"])
        .assert()
        .success();

    assert_eq!(env.docker_calls()[0], "manifest inspect r.io/api:2.1.0");
}

/// Test that a file: override is chased relative to the project.
#[test]
fn test_publish_file_version_override() {
    let env = publish_env();
    env.write_file("release/version.json", r#"{"version":"4.0.0"}"#);

    env.command()
        .args(["publish", "file:release/version.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published r.io/api:4.0.0 and latest"));
}

// ============================================================================
// Failures
// ============================================================================

/// Test that a missing registry fails before any command.
#[test]
fn test_publish_missing_registry() {
    let env = TestEnv::new();
    env.write_config(r#"{"image":"api","version":"1.0.0"}"#);

    env.command()
        .arg("publish")
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("registry must be specified"));

    assert!(env.docker_calls().is_empty());
}

/// Test that a failed push stops the sequence and exits with code 1.
#[test]
fn test_publish_push_failure_halts() {
    let env = publish_env();
    env.fail_on("push");

    env.command()
        .arg("publish")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("push r.io/api:1.0.0"))
        .stdout(predicate::str::contains("Published").not());

    let calls = env.docker_calls_without_probe();
    assert_eq!(calls.last().map(String::as_str), Some("push r.io/api:1.0.0"));
    assert!(!calls.contains(&"push r.io/api:latest".to_string()));
}

/// Test that a failed login stops before the build.
#[test]
fn test_publish_login_failure_halts() {
    let env = publish_env();
    env.fail_on("login");

    env.command().arg("publish").assert().failure().code(1);

    assert_eq!(env.docker_calls_without_probe(), vec!["login r.io"]);
}

// ============================================================================
// Dry run and warnings
// ============================================================================

/// Test that --dry-run still runs the guard but nothing else.
#[test]
fn test_publish_dry_run() {
    let env = publish_env();

    env.command()
        .args(["--dry-run", "publish"])
        .assert()
        .success()
        .stderr(predicate::str::contains("1. Log in to r.io"))
        .stderr(predicate::str::contains("4. Push r.io/api:latest"));

    assert_eq!(env.docker_calls(), vec!["manifest inspect r.io/api:1.0.0"]);
}

/// Test that publishing "latest" warns unless --quiet.
#[test]
fn test_publish_latest_warns() {
    let env = TestEnv::new();
    env.write_config(r#"{"image":"api","registry":"r.io"}"#);

    env.command()
        .arg("publish")
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN:"))
        .stdout(predicate::str::contains("Published r.io/api:latest and latest"));

    env.command()
        .args(["--quiet", "publish", "--force"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN:").not());
}
