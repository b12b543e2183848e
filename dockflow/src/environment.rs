//! Explicit view of the process environment used during resolution.
//!
//! Resolution never reads the current directory, the filesystem or
//! environment variables directly. It goes through an [`Environment`], which
//! bundles the project directory, a [`FileSource`] and a snapshot of
//! variables. Production code builds one with [`Environment::from_process`];
//! tests use [`MemoryFileSource`] and hand-made variable maps.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Read-only file access.
///
/// Implementations return `Ok(None)` for files that do not exist; every other
/// failure is an error.
pub trait FileSource {
    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<Option<String>>;
}

/// [`FileSource`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSource;

impl FileSource for OsFileSource {
    fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory [`FileSource`] keyed by path.
///
/// # Examples
///
/// ```
/// use dockflow::environment::{FileSource, MemoryFileSource};
/// use std::path::Path;
///
/// let files = MemoryFileSource::new().with_file("/app/dockflow.json", r#"{"image":"app"}"#);
/// assert!(files.read_to_string(Path::new("/app/dockflow.json")).unwrap().is_some());
/// assert!(files.read_to_string(Path::new("/app/package.json")).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSource {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSource {
    /// Create an empty file source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileSource for MemoryFileSource {
    fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}

/// Everything target resolution is allowed to observe.
pub struct Environment<'a> {
    working_dir: PathBuf,
    files: &'a dyn FileSource,
    vars: BTreeMap<String, String>,
}

impl<'a> Environment<'a> {
    /// Create an environment rooted at `working_dir` with no variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::environment::{Environment, MemoryFileSource};
    ///
    /// let files = MemoryFileSource::new();
    /// let env = Environment::new("/project", &files).with_var("DOCKFLOW_IMAGE", "api");
    /// assert_eq!(env.var("DOCKFLOW_IMAGE"), Some("api"));
    /// ```
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>, files: &'a dyn FileSource) -> Self {
        Self {
            working_dir: working_dir.into(),
            files,
            vars: BTreeMap::new(),
        }
    }

    /// Capture the current process: `working_dir` (or the current directory
    /// when `None`) and a snapshot of all UTF-8 environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `working_dir` is `None` and the current directory
    /// cannot be determined.
    pub fn from_process(working_dir: Option<PathBuf>, files: &'a dyn FileSource) -> Result<Self> {
        let working_dir = match working_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => env::current_dir()?.join(dir),
            None => env::current_dir()?,
        };
        Ok(Self {
            working_dir,
            files,
            vars: env::vars().collect(),
        })
    }

    /// Add or replace a variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// The project directory; relative paths resolve against it.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The file capability.
    #[must_use]
    pub fn files(&self) -> &dyn FileSource {
        self.files
    }

    /// Look up a variable.
    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Resolve `path` against the working directory. Absolute paths are
    /// returned unchanged.
    #[must_use]
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.working_dir.join(path)
    }
}
