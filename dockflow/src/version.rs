//! Version resolution.
//!
//! The effective version is chosen first, then dereferenced: a CLI override
//! beats the configured version, and whichever wins is followed through a
//! `file:` indirection if it has one.

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::schema::DEFAULT_VERSION;
use crate::config::ConfigLoader;
use crate::environment::Environment;
use crate::error::{Error, Result};

/// Prefix marking a version string as a path to a JSON version file.
pub const FILE_PREFIX: &str = "file:";

#[derive(Debug, Deserialize)]
struct VersionFile {
    version: Option<String>,
}

/// Resolves the effective version for an invocation.
///
/// # Examples
///
/// ```
/// use dockflow::environment::{Environment, MemoryFileSource};
/// use dockflow::version::VersionResolver;
///
/// let files = MemoryFileSource::new()
///     .with_file("/app/rel/version.json", r#"{"version":"2.3.4"}"#);
/// let env = Environment::new("/app", &files);
/// let resolver = VersionResolver::new(&env);
///
/// assert_eq!(resolver.resolve(Some("file:rel/version.json"), None).unwrap(), "2.3.4");
/// assert_eq!(resolver.resolve(Some("file:rel/version.json"), Some("5.0.0")).unwrap(), "5.0.0");
/// assert_eq!(resolver.resolve(None, None).unwrap(), "latest");
/// ```
pub struct VersionResolver<'e, 'a> {
    env: &'e Environment<'a>,
}

impl<'e, 'a> VersionResolver<'e, 'a> {
    /// Create a resolver reading indirection files through `env`.
    #[must_use]
    pub const fn new(env: &'e Environment<'a>) -> Self {
        Self { env }
    }

    /// Resolve the version.
    ///
    /// `cli_override` wins outright; otherwise `config_version` is used,
    /// defaulting to `"latest"`. The chosen value is then dereferenced once
    /// if it starts with `file:`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingVersionFile`] if an indirection file does not exist.
    /// - [`Error::InvalidConfigJson`] if it is not JSON or lacks a string
    ///   `version` field.
    pub fn resolve(&self, config_version: Option<&str>, cli_override: Option<&str>) -> Result<String> {
        let candidate = cli_override
            .filter(|v| !v.trim().is_empty())
            .or(config_version)
            .unwrap_or(DEFAULT_VERSION);

        match candidate.strip_prefix(FILE_PREFIX) {
            Some(path) => self.read_version_file(path),
            None => Ok(candidate.to_string()),
        }
    }

    fn read_version_file(&self, path: &str) -> Result<String> {
        let path: PathBuf = self.env.resolve_path(path.trim());
        log::debug!("reading version from {}", path.display());

        let file: VersionFile = ConfigLoader::load_optional(self.env.files(), &path)?
            .ok_or_else(|| Error::MissingVersionFile { path: path.clone() })?;

        file.version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::InvalidConfigJson {
                path,
                message: "missing string field `version`".to_string(),
            })
    }
}
