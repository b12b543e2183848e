//! Configuration file loading.
//!
//! This module reads `dockflow.json` and `package.json` from the project
//! directory through the [`Environment`]'s file capability.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::schema::{
    BuildConfig, PackageMetadata, PACKAGE_MANIFEST_FILE, PROJECT_CONFIG_FILE,
};
use crate::environment::{Environment, FileSource};
use crate::error::{Error, Result};

/// The raw contents of both configuration files.
///
/// A file that does not exist contributes `Default::default()`; its `*_path`
/// field is still set so callers can report where dockflow looked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    /// Where the project config was looked up.
    pub project_path: PathBuf,
    /// Whether the project config file exists.
    pub project_found: bool,
    /// Parsed `dockflow.json`.
    pub project: BuildConfig,
    /// Where the package manifest was looked up.
    pub package_path: PathBuf,
    /// Whether the package manifest exists.
    pub package_found: bool,
    /// Parsed `package.json`.
    pub package: PackageMetadata,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```
/// use dockflow::config::ConfigLoader;
/// use dockflow::environment::{Environment, MemoryFileSource};
///
/// let files = MemoryFileSource::new()
///     .with_file("/app/package.json", r#"{"name":"web","version":"1.0.0"}"#);
/// let env = Environment::new("/app", &files);
///
/// let sources = ConfigLoader::load_sources(&env).unwrap();
/// assert!(!sources.project_found);
/// assert_eq!(sources.package.name.as_deref(), Some("web"));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `dockflow.json` and `package.json` from the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfigJson`] if either file exists but is not
    /// valid JSON for its schema, or an I/O error if it cannot be read.
    pub fn load_sources(env: &Environment<'_>) -> Result<ConfigSources> {
        let project_path = env.resolve_path(PROJECT_CONFIG_FILE);
        let package_path = env.resolve_path(PACKAGE_MANIFEST_FILE);

        let project = Self::load_optional::<BuildConfig>(env.files(), &project_path)?;
        let package = Self::load_optional::<PackageMetadata>(env.files(), &package_path)?;

        Ok(ConfigSources {
            project_found: project.is_some(),
            project: project.unwrap_or_default(),
            project_path,
            package_found: package.is_some(),
            package: package.unwrap_or_default(),
            package_path,
        })
    }

    /// Load and parse a JSON file, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfigJson`] if the file is not valid JSON for
    /// `T`, or an I/O error if it cannot be read.
    pub fn load_optional<T: DeserializeOwned>(
        files: &dyn FileSource,
        path: &Path,
    ) -> Result<Option<T>> {
        let Some(contents) = files.read_to_string(path)? else {
            log::debug!("{} not found, treating as empty", path.display());
            return Ok(None);
        };

        log::debug!("loading {}", path.display());
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| Error::InvalidConfigJson {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}
