//! Registry queries used by the publish guard.
//!
//! This module provides trait-based existence checking so the publish plan
//! can be tested without a registry. The production checker shells out to
//! `<tool> manifest inspect`.

use std::collections::HashSet;
use std::process::{Command, Stdio};

/// Answers whether `registry/image:version` is already published.
///
/// Implementations never fail: anything that prevents a definite answer is
/// reported as "does not exist".
pub trait ExistenceChecker {
    /// Returns true if the tag exists in the registry.
    fn exists(&self, registry: &str, image: &str, version: &str) -> bool;
}

/// Probes the registry with `<tool> manifest inspect <reference>`.
///
/// # Examples
///
/// ```no_run
/// use dockflow::registry::{DockerManifestChecker, ExistenceChecker};
///
/// let checker = DockerManifestChecker::new("docker");
/// if checker.exists("ghcr.io/acme", "api", "1.0.0") {
///     println!("already published");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DockerManifestChecker {
    tool: String,
}

impl DockerManifestChecker {
    /// Create a checker that invokes `tool` (e.g. `docker` or `podman`).
    #[must_use]
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

impl ExistenceChecker for DockerManifestChecker {
    fn exists(&self, registry: &str, image: &str, version: &str) -> bool {
        let reference = format!("{registry}/{image}:{version}");
        let status = Command::new(&self.tool)
            .args(["manifest", "inspect", &reference])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                log::debug!("manifest probe for {reference} exited with {status}; assuming absent");
                false
            }
            Err(e) => {
                log::debug!("manifest probe for {reference} failed to start: {e}; assuming absent");
                false
            }
        }
    }
}

/// Existence checker with a fixed set of published references.
///
/// # Examples
///
/// ```
/// use dockflow::registry::{ExistenceChecker, StaticExistenceChecker};
///
/// let checker = StaticExistenceChecker::new(["ghcr.io/acme/api:1.0.0"]);
/// assert!(checker.exists("ghcr.io/acme", "api", "1.0.0"));
/// assert!(!checker.exists("ghcr.io/acme", "api", "1.0.1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticExistenceChecker {
    published: HashSet<String>,
}

impl StaticExistenceChecker {
    /// Create a checker where exactly `references` exist.
    #[must_use]
    pub fn new<I, S>(references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            published: references.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a checker where nothing exists.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ExistenceChecker for StaticExistenceChecker {
    fn exists(&self, registry: &str, image: &str, version: &str) -> bool {
        self.published
            .contains(&format!("{registry}/{image}:{version}"))
    }
}

/// The registry host to log in to, if `registry` names one.
///
/// The first path segment is a host when it contains a `.` or `:` or is
/// `localhost`; otherwise `registry` is a Docker Hub namespace and the
/// default registry is used.
///
/// # Examples
///
/// ```
/// use dockflow::registry::login_host;
///
/// assert_eq!(login_host("ghcr.io/acme"), Some("ghcr.io"));
/// assert_eq!(login_host("localhost:5000"), Some("localhost:5000"));
/// assert_eq!(login_host("acme"), None);
/// ```
#[must_use]
pub fn login_host(registry: &str) -> Option<&str> {
    let first = registry.split('/').next().unwrap_or_default();
    (first.contains('.') || first.contains(':') || first == "localhost").then_some(first)
}
