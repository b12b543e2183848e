//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use dockflow::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: An external command failed
    /// - 2: Usage error (reported by clap before any command runs)
    /// - 3: Version already published
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::CommandExecutionFailed { .. } | LibError::CommandSpawnFailed { .. } => 1,
                LibError::VersionAlreadyExists { .. } => 3,
                LibError::InvalidUsage(_) => 4,
                LibError::Io(_) => 5,
                e if e.is_configuration_error() => 7,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
