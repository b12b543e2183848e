//! Operator-facing diagnostics on stderr.
//!
//! Progress lines for the commands being run go to stdout (see
//! [`crate::operations::PlanExecutor`]); everything else a human might want
//! to see while dockflow works goes through the [`Logger`] here. Library
//! internals additionally emit `log::debug!` records through the `log`
//! facade for embedders that install a backend.

use std::env;
use std::fmt;

/// Environment variable consulted by [`init_logger`] when no CLI flag is set.
pub const LOG_MODE_VAR: &str = "DOCKFLOW_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Ordered from least verbose (`Quiet`) to most verbose (`Verbose`).
///
/// # Examples
///
/// ```
/// use dockflow::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress warnings and informational output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error message if the string is not one of `quiet`,
    /// `normal` or `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("Verbose").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// A stderr logger filtered by [`LogLevel`].
///
/// # Examples
///
/// ```
/// use dockflow::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.warn("publishing the 'latest' version");
/// logger.info("not shown unless verbose");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Logs a warning message unless the level is `Quiet`.
    pub fn warn(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("WARN: {message}");
        }
    }

    /// Logs an informational message at `Verbose` level.
    pub fn info(&self, message: &str) {
        if self.level >= LogLevel::Verbose {
            eprintln!("INFO: {message}");
        }
    }

    /// Logs a debug message at `Verbose` level.
    pub fn debug(&self, message: &str) {
        if self.level >= LogLevel::Verbose {
            eprintln!("DEBUG: {message}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

/// Builds the logger for a CLI invocation.
///
/// Priority: `verbose` flag, then `quiet` flag, then [`LOG_MODE_VAR`], then
/// `Normal`. An unparseable environment value is ignored.
///
/// # Examples
///
/// ```
/// use dockflow::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    env::var(LOG_MODE_VAR)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .map_or_else(Logger::default, Logger::new)
}
