//! Target resolution.
//!
//! [`resolve_target`] is the single entry point turning an [`Environment`]
//! and the CLI's version override into an immutable [`ResolvedTarget`]. It
//! loads both config files, applies environment overrides, merges the
//! layers, sanitizes the image name and resolves the version.

use std::fmt;

use crate::config::{ConfigLoader, ConfigMerger, EnvironmentOverrides};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::sanitize::sanitize;
use crate::version::VersionResolver;

/// Tag applied alongside the version tag.
pub const LATEST_TAG: &str = "latest";

/// The fully resolved image coordinates for one invocation.
///
/// The image name is always non-empty and sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    image: String,
    configured_image: String,
    version: String,
    registry: Option<String>,
    dockerfile: String,
}

impl ResolvedTarget {
    /// Build a target from already-resolved parts.
    ///
    /// `image` is sanitized here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingImageName`] if `image` is blank, or
    /// [`Error::InvalidImageName`] if it sanitizes to nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::ResolvedTarget;
    ///
    /// let target = ResolvedTarget::new("My App", "1.0.0", Some("ghcr.io/acme".into()), "Dockerfile").unwrap();
    /// assert_eq!(target.image(), "my-app");
    /// assert_eq!(target.registry_reference(target.version()).as_deref(), Some("ghcr.io/acme/my-app:1.0.0"));
    /// ```
    pub fn new(
        image: impl Into<String>,
        version: impl Into<String>,
        registry: Option<String>,
        dockerfile: impl Into<String>,
    ) -> Result<Self> {
        let configured_image = image.into();
        if configured_image.trim().is_empty() {
            return Err(Error::MissingImageName);
        }

        let image = sanitize(&configured_image);
        if image.is_empty() {
            return Err(Error::InvalidImageName {
                raw: configured_image,
            });
        }

        Ok(Self {
            image,
            configured_image,
            version: version.into(),
            registry,
            dockerfile: dockerfile.into(),
        })
    }

    /// Sanitized image name.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Image name as configured, before sanitization.
    #[must_use]
    pub fn configured_image(&self) -> &str {
        &self.configured_image
    }

    /// Whether sanitization changed the configured name.
    #[must_use]
    pub fn was_renamed(&self) -> bool {
        self.image != self.configured_image
    }

    /// Resolved version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Registry prefix, if configured.
    #[must_use]
    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    /// Dockerfile path.
    #[must_use]
    pub fn dockerfile(&self) -> &str {
        &self.dockerfile
    }

    /// Local reference `image:tag`.
    #[must_use]
    pub fn local_reference(&self, tag: &str) -> String {
        format!("{}:{tag}", self.image)
    }

    /// Registry reference `registry/image:tag`, if a registry is configured.
    #[must_use]
    pub fn registry_reference(&self, tag: &str) -> Option<String> {
        self.registry
            .as_deref()
            .map(|registry| format!("{registry}/{}:{tag}", self.image))
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.registry_reference(&self.version) {
            Some(reference) => f.write_str(&reference),
            None => f.write_str(&self.local_reference(&self.version)),
        }
    }
}

/// Resolve the target for this invocation.
///
/// `version_override` is the publish action's CLI version, if any.
///
/// # Errors
///
/// Any configuration error: invalid JSON, no image name, an image name with
/// no usable characters, or a missing version file.
///
/// # Examples
///
/// ```
/// use dockflow::environment::{Environment, MemoryFileSource};
/// use dockflow::resolve_target;
///
/// let files = MemoryFileSource::new()
///     .with_file("/app/dockflow.json", r#"{"image":"My App!!","version":"file:rel/version.json"}"#)
///     .with_file("/app/rel/version.json", r#"{"version":"2.3.4"}"#);
/// let env = Environment::new("/app", &files);
///
/// let target = resolve_target(&env, None).unwrap();
/// assert_eq!(target.image(), "my-app");
/// assert_eq!(target.version(), "2.3.4");
/// assert_eq!(target.dockerfile(), "Dockerfile");
/// ```
pub fn resolve_target(env: &Environment<'_>, version_override: Option<&str>) -> Result<ResolvedTarget> {
    let mut sources = ConfigLoader::load_sources(env)?;
    EnvironmentOverrides::apply(&mut sources.project, env);
    let merged = ConfigMerger::merge(&sources);

    let image = merged.image.clone().ok_or(Error::MissingImageName)?;
    let version = VersionResolver::new(env).resolve(merged.version.as_deref(), version_override)?;

    let target = ResolvedTarget::new(image, version, merged.registry, merged.dockerfile)?;
    log::debug!("resolved target {target}");
    Ok(target)
}
