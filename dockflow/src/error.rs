//! Error types for the dockflow library.
//!
//! This module provides the error hierarchy for target resolution, planning
//! and plan execution, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a dockflow error.
///
/// # Examples
///
/// ```
/// use dockflow::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("latest".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the dockflow library.
///
/// Every variant is fatal for the invocation that produced it; nothing is
/// retried or recovered.
#[derive(Debug, Error)]
pub enum Error {
    /// No image name was found in `dockflow.json`, `package.json` or the
    /// environment.
    #[error("image name must be specified in dockflow.json or package.json")]
    MissingImageName,

    /// The configured image name sanitizes to an empty string.
    #[error("image name '{raw}' contains no usable characters")]
    InvalidImageName {
        /// The configured image name.
        raw: String,
    },

    /// A JSON configuration file exists but could not be parsed.
    #[error("invalid JSON in {}: {message}", path.display())]
    InvalidConfigJson {
        /// The file that failed to parse.
        path: PathBuf,
        /// The parser's description of the problem.
        message: String,
    },

    /// A `file:` version indirection points to a file that does not exist.
    #[error("version file not found: {}", path.display())]
    MissingVersionFile {
        /// The resolved path of the version file.
        path: PathBuf,
    },

    /// Publishing requires a registry and none is configured.
    #[error("registry must be specified in dockflow.json for the publish task")]
    MissingRegistry,

    /// The registry already holds the tag being published.
    #[error("{reference} already exists in the registry (use --force to overwrite)")]
    VersionAlreadyExists {
        /// The full image reference that was found.
        reference: String,
    },

    /// An external command exited unsuccessfully or could not be started.
    #[error("command failed ({}): {command}", status_text(*.code))]
    CommandExecutionFailed {
        /// The rendered command line.
        command: String,
        /// The exit code, if the process produced one.
        code: Option<i32>,
    },

    /// An external command could not be started at all.
    #[error("failed to start '{program}': {source}")]
    CommandSpawnFailed {
        /// The program that was invoked.
        program: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An action name other than `build` or `publish` was given.
    #[error("invalid usage: unknown action '{0}', expected \"build\" or \"publish\"")]
    InvalidUsage(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_text(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Check if error stems from the project configuration rather than from
    /// the build tool or the operating system.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::Error;
    ///
    /// assert!(Error::MissingRegistry.is_configuration_error());
    /// assert!(!Error::InvalidUsage("deploy".into()).is_configuration_error());
    /// ```
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingImageName
                | Self::InvalidImageName { .. }
                | Self::InvalidConfigJson { .. }
                | Self::MissingVersionFile { .. }
                | Self::MissingRegistry
        )
    }
}
