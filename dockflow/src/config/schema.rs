//! Configuration file schemas.
//!
//! Two JSON files feed resolution: the project config `dockflow.json` and the
//! package manifest `package.json`. Both are optional and every key in them
//! is optional.

use serde::{Deserialize, Serialize};

/// File name of the project config.
pub const PROJECT_CONFIG_FILE: &str = "dockflow.json";

/// File name of the package manifest.
pub const PACKAGE_MANIFEST_FILE: &str = "package.json";

/// Dockerfile used when none is configured.
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";

/// Version used when neither file provides one.
pub const DEFAULT_VERSION: &str = "latest";

/// Contents of `dockflow.json`.
///
/// Unknown keys are ignored.
///
/// # Examples
///
/// ```
/// use dockflow::config::BuildConfig;
///
/// let config: BuildConfig =
///     serde_json::from_str(r#"{"image":"api","registry":"ghcr.io/acme"}"#).unwrap();
/// assert_eq!(config.image.as_deref(), Some("api"));
/// assert!(config.version.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Image name; takes precedence over the package name.
    pub image: Option<String>,

    /// Registry prefix, e.g. `ghcr.io/acme` or a Docker Hub namespace.
    pub registry: Option<String>,

    /// Version, or `file:<path>` to read it from another JSON file.
    pub version: Option<String>,

    /// Path to the Dockerfile, relative to the project directory.
    pub dockerfile: Option<String>,
}

/// The subset of `package.json` that dockflow reads.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Package name, used as the image name fallback.
    pub name: Option<String>,

    /// Package version, used as the version fallback.
    pub version: Option<String>,
}
