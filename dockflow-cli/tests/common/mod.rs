//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - A temporary project directory with config file helpers
//! - A fake build tool (unix only) that records its invocations
//! - Command builder helpers isolated from the caller's environment

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the caller's settings into a test.
const ISOLATED_VARS: &[&str] = &[
    "DOCKFLOW_DIR",
    "DOCKFLOW_DOCKER",
    "DOCKFLOW_IMAGE",
    "DOCKFLOW_REGISTRY",
    "DOCKFLOW_VERSION",
    "DOCKFLOW_DOCKERFILE",
    "DOCKFLOW_LOG_MODE",
];

/// Test environment with an isolated project directory and fake build tool.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
    /// Project directory passed via --dir
    pub project: PathBuf,
    /// Fake build tool script
    pub docker: PathBuf,
    /// File the fake build tool appends its arguments to
    log: PathBuf,
    /// File the fake build tool appends its working directory to
    dirs: PathBuf,
    /// References the fake `manifest inspect` reports as published
    published: PathBuf,
    /// Subcommand the fake build tool fails on
    fail_on: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an empty project directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let project = root.join("project");
        fs::create_dir_all(&project).expect("Failed to create project dir");

        let env = Self {
            project,
            docker: root.join("fake-docker"),
            log: root.join("docker.log"),
            dirs: root.join("docker-dirs.log"),
            published: root.join("published.txt"),
            fail_on: root.join("fail-on.txt"),
            temp_dir,
        };
        env.install_fake_docker();
        env
    }

    #[cfg(unix)]
    fn install_fake_docker(&self) {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
pwd >> '{dirs}'
if [ "$1" = manifest ]; then
  grep -qxF "$3" '{published}' 2>/dev/null && exit 0
  exit 1
fi
if [ -f '{fail}' ] && [ "$1" = "$(cat '{fail}')" ]; then
  exit 42
fi
exit 0
"#,
            log = self.log.display(),
            dirs = self.dirs.display(),
            published = self.published.display(),
            fail = self.fail_on.display(),
        );
        fs::write(&self.docker, script).expect("Failed to write fake docker");
        fs::set_permissions(&self.docker, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake docker executable");
    }

    #[cfg(not(unix))]
    fn install_fake_docker(&self) {}

    /// Get a bare command builder with only environment isolation.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("dockflow").expect("Failed to find dockflow binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder pointed at the project and the fake build tool.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--dir")
            .arg(&self.project)
            .arg("--docker")
            .arg(&self.docker);
        cmd
    }

    /// Write `dockflow.json`.
    pub fn write_config(&self, json: &str) {
        self.write_file("dockflow.json", json);
    }

    /// Write `package.json`.
    pub fn write_package(&self, json: &str) {
        self.write_file("package.json", json);
    }

    /// Write a file relative to the project directory.
    pub fn write_file(&self, relative: &str, contents: &str) {
        let path = self.project.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, contents).expect("Failed to write project file");
    }

    /// Make the fake `manifest inspect` report `reference` as published.
    pub fn mark_published(&self, reference: &str) {
        fs::write(&self.published, format!("{reference}\n")).expect("Failed to write published");
    }

    /// Make the fake build tool exit with 42 for `subcommand` (e.g. `push`).
    pub fn fail_on(&self, subcommand: &str) {
        fs::write(&self.fail_on, subcommand).expect("Failed to write fail marker");
    }

    /// Arguments of every fake build tool invocation, in order.
    pub fn docker_calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Invocations other than the registry existence probe.
    pub fn docker_calls_without_probe(&self) -> Vec<String> {
        self.docker_calls()
            .into_iter()
            .filter(|call| !call.starts_with("manifest "))
            .collect()
    }

    /// Working directory of every fake build tool invocation, canonicalized.
    pub fn docker_dirs(&self) -> Vec<PathBuf> {
        fs::read_to_string(&self.dirs)
            .map(|log| {
                log.lines()
                    .map(|dir| fs::canonicalize(dir).expect("Failed to canonicalize dir"))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Create a directory next to the project to run dockflow from.
    pub fn outside_dir(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("elsewhere");
        fs::create_dir_all(&dir).expect("Failed to create outside dir");
        dir
    }

    /// Canonical project path, comparable with [`TestEnv::docker_dirs`].
    pub fn canonical_project(&self) -> PathBuf {
        fs::canonicalize(&self.project).expect("Failed to canonicalize project")
    }

    /// Get the project path.
    pub fn path(&self) -> &Path {
        &self.project
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
