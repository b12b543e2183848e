//! Running external commands.
//!
//! [`CommandRunner`] is the seam between planning and the operating system.
//! [`ProcessRunner`] spawns real processes with inherited stdio so build
//! output and login prompts reach the terminal unbuffered. It runs them in
//! the project directory so relative Dockerfile paths and the `.` build
//! context resolve there.
//! [`RecordingRunner`] records invocations for tests.

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// One external invocation: a program and its arguments.
///
/// # Examples
///
/// ```
/// use dockflow::run::CommandLine;
///
/// let cmd = CommandLine::new("docker").arg("push").arg("ghcr.io/acme/api:1.0.0");
/// assert_eq!(cmd.to_string(), "docker push ghcr.io/acme/api:1.0.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Start a command line for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program to run.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in order.
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Values following each occurrence of `flag`, e.g. all `-t` tags.
    #[must_use]
    pub fn flag_values(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

// Display only; commands are never passed through a shell.
fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    code: Option<i32>,
}

impl RunStatus {
    /// Create a status from an exit code (`None` if killed by a signal).
    #[must_use]
    pub const fn new(code: Option<i32>) -> Self {
        Self { code }
    }

    /// The exit code, if any.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// Whether the command exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Executes commands synchronously.
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command could not be run at all; a
    /// non-zero exit is reported through [`RunStatus`].
    fn run(&self, command: &CommandLine) -> Result<RunStatus>;
}

/// Runs commands as child processes with inherited stdin, stdout and stderr.
///
/// Without [`ProcessRunner::in_dir`] children inherit the caller's current
/// directory.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Create a runner that uses the caller's current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command from `dir`.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The directory commands run from, if set.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &CommandLine) -> Result<RunStatus> {
        let mut process = Command::new(command.program());
        if let Some(dir) = &self.working_dir {
            process.current_dir(dir);
        }
        let status = process
            .args(command.get_args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::CommandSpawnFailed {
                program: command.program().to_string(),
                source,
            })?;
        Ok(RunStatus::new(status.code()))
    }
}

/// Records every command instead of running it.
///
/// # Examples
///
/// ```
/// use dockflow::run::{CommandLine, CommandRunner, RecordingRunner};
///
/// let runner = RecordingRunner::new().fail_at(1, 125);
/// assert!(runner.run(&CommandLine::new("docker").arg("login")).unwrap().success());
/// assert!(!runner.run(&CommandLine::new("docker").arg("build")).unwrap().success());
/// assert_eq!(runner.commands().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<CommandLine>>,
    failure: Option<(usize, i32)>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the command at zero-based `index` exit with `code`.
    #[must_use]
    pub fn fail_at(mut self, index: usize, code: i32) -> Self {
        self.failure = Some((index, code));
        self
    }

    /// The commands run so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<CommandLine> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandLine) -> Result<RunStatus> {
        let mut commands = self.commands.borrow_mut();
        let index = commands.len();
        commands.push(command.clone());

        Ok(match self.failure {
            Some((fail_index, code)) if fail_index == index => RunStatus::new(Some(code)),
            _ => RunStatus::new(Some(0)),
        })
    }
}
