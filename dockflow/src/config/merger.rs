//! Configuration precedence.
//!
//! Each setting is resolved by [`first_present`] over an explicit, ordered
//! list of candidates, highest priority first:
//!
//! | Setting      | Candidates                                               |
//! |--------------|----------------------------------------------------------|
//! | `image`      | `dockflow.json` `image`, `package.json` `name`           |
//! | `registry`   | `dockflow.json` `registry`                               |
//! | `version`    | `dockflow.json` `version`, `package.json` `version`      |
//! | `dockerfile` | `dockflow.json` `dockerfile`, then `"Dockerfile"`        |
//!
//! Environment variable overrides are applied to the `dockflow.json` layer
//! beforehand (see [`crate::config::EnvironmentOverrides`]).

use crate::config::loader::ConfigSources;
use crate::config::schema::{DEFAULT_DOCKERFILE, DEFAULT_VERSION};

/// The merged view of all configuration layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    /// Raw (unsanitized) image name, if any layer provided one.
    pub image: Option<String>,
    /// Registry prefix, if configured.
    pub registry: Option<String>,
    /// Configured version, if any layer provided one.
    pub version: Option<String>,
    /// Dockerfile path.
    pub dockerfile: String,
}

impl MergedConfig {
    /// The configured version, or `"latest"`.
    #[must_use]
    pub fn version_or_default(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }
}

/// Returns the first candidate that is present and not blank.
///
/// Blank strings count as absent, so `{"image": ""}` falls through to the
/// package name.
///
/// # Examples
///
/// ```
/// use dockflow::config::first_present;
///
/// assert_eq!(first_present([None, Some(""), Some("web")]), Some("web".to_string()));
/// assert_eq!(first_present([None, Some("  ")]), None);
/// ```
#[must_use]
pub fn first_present<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use dockflow::config::{BuildConfig, ConfigMerger, ConfigSources, PackageMetadata};
///
/// let sources = ConfigSources {
///     project: BuildConfig { version: Some("3.0.0".into()), ..Default::default() },
///     package: PackageMetadata { name: Some("web".into()), version: Some("1.0.0".into()) },
///     ..Default::default()
/// };
///
/// let merged = ConfigMerger::merge(&sources);
/// assert_eq!(merged.image.as_deref(), Some("web"));
/// assert_eq!(merged.version.as_deref(), Some("3.0.0"));
/// assert_eq!(merged.dockerfile, "Dockerfile");
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge the loaded sources into a single view.
    #[must_use]
    pub fn merge(sources: &ConfigSources) -> MergedConfig {
        let project = &sources.project;
        let package = &sources.package;

        MergedConfig {
            image: first_present([project.image.as_deref(), package.name.as_deref()]),
            registry: first_present([project.registry.as_deref()])
                .map(|registry| registry.trim_end_matches('/').to_string())
                .filter(|registry| !registry.is_empty()),
            version: first_present([project.version.as_deref(), package.version.as_deref()]),
            dockerfile: first_present([project.dockerfile.as_deref()])
                .unwrap_or_else(|| DEFAULT_DOCKERFILE.to_string()),
        }
    }
}
