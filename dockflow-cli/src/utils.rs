//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including project directory handling, target resolution and plan output.

use crate::cli::Cli;
use crate::error::CliError;
use dockflow::environment::{Environment, FileSource};
use dockflow::{resolve_target, Logger, OperationPlan, PlanAction, ResolvedTarget};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Project directory override.
    pub dir: Option<PathBuf>,

    /// Container build tool binary.
    pub docker: String,

    /// Print plans instead of running them.
    pub dry_run: bool,

    /// Stderr logger for this invocation; carries the `--verbose` level.
    pub logger: Logger,
}

impl GlobalOptions {
    /// Collect the global flags and initialize the logger.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            quiet: cli.quiet,
            dir: cli.dir.clone(),
            docker: cli.docker.clone(),
            dry_run: cli.dry_run,
            logger: dockflow::init_logger(cli.verbose, cli.quiet),
        }
    }
}

/// A resolved target together with the directory its commands run from.
#[derive(Debug)]
pub struct Project {
    /// Image coordinates for this invocation.
    pub target: ResolvedTarget,

    /// Project directory; build context and Dockerfile paths are relative to it.
    pub working_dir: PathBuf,
}

/// Capture the process environment rooted at the project directory.
///
/// # Errors
///
/// Returns `InvalidArguments` if an explicit `--dir` is not a directory.
pub fn project_environment<'a>(
    global: &GlobalOptions,
    files: &'a dyn FileSource,
) -> Result<Environment<'a>, CliError> {
    if let Some(dir) = &global.dir {
        if !dir.is_dir() {
            return Err(CliError::InvalidArguments(format!(
                "project directory does not exist: {}",
                dir.display()
            )));
        }
    }

    let env = Environment::from_process(global.dir.clone(), files)?;
    global.logger.info(&format!(
        "Executing dockflow in {}",
        shorten_path(env.working_dir())
    ));
    Ok(env)
}

/// Resolve the target for this invocation and remember where it lives.
pub fn resolve(
    global: &GlobalOptions,
    files: &dyn FileSource,
    version_override: Option<&str>,
) -> Result<Project, CliError> {
    let env = project_environment(global, files)?;
    let target = resolve_target(&env, version_override)?;
    global.logger.debug(&format!("Resolved target {target}"));
    Ok(Project {
        target,
        working_dir: env.working_dir().to_path_buf(),
    })
}

/// Echo a command to stdout just before it runs.
pub fn echo_command(action: &PlanAction) {
    println!("CMD: {}", action.command());
}

/// Print a plan for `--dry-run`.
pub fn print_dry_run(plan: &OperationPlan, global: &GlobalOptions) {
    if global.quiet {
        return;
    }

    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
        eprintln!("     {}", action.command());
    }
    if !plan.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &plan.warnings {
            eprintln!("  - {warning}");
        }
    }
}

/// Report plan warnings through the logger.
pub fn print_warnings(warnings: &[String], global: &GlobalOptions) {
    for warning in warnings {
        global.logger.warn(warning);
    }
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockflow::{LogLevel, MemoryFileSource};

    fn global(dir: Option<PathBuf>) -> GlobalOptions {
        GlobalOptions {
            quiet: true,
            dir,
            docker: "docker".to_string(),
            dry_run: false,
            logger: Logger::new(LogLevel::Quiet),
        }
    }

    #[test]
    fn test_shorten_path_outside_home() {
        let path = PathBuf::from("/usr/local/bin");
        assert_eq!(shorten_path(&path), "/usr/local/bin");
    }

    #[test]
    fn test_shorten_path_inside_home() {
        if let Some(home) = home::home_dir() {
            assert_eq!(shorten_path(&home.join("project")), "~/project");
        }
    }

    #[test]
    fn test_missing_dir_is_invalid_argument() {
        let files = MemoryFileSource::new();
        let result = project_environment(
            &global(Some(PathBuf::from("/definitely/not/here/dockflow"))),
            &files,
        );
        match result {
            Err(err) => assert_eq!(err.exit_code(), 4),
            Ok(_) => panic!("expected an invalid argument error"),
        }
    }

    #[test]
    fn test_resolve_uses_given_dir() {
        let dir = tempfile::tempdir().unwrap();
        let files = MemoryFileSource::new().with_file(
            dir.path().join("package.json"),
            r#"{"name":"web","version":"3.0.0"}"#,
        );

        let project = resolve(&global(Some(dir.path().to_path_buf())), &files, None).unwrap();
        assert_eq!(project.target.image(), "web");
        assert_eq!(project.target.version(), "3.0.0");
        assert_eq!(project.working_dir, dir.path());
    }

    #[test]
    fn test_relative_dir_is_anchored_to_cwd() {
        let files = MemoryFileSource::new();
        let env = project_environment(&global(Some(PathBuf::from("."))), &files).unwrap();
        assert!(env.working_dir().is_absolute());
    }

    #[test]
    fn test_global_options_from_cli() {
        use clap::Parser;

        let cli = Cli::try_parse_from([
            "dockflow", "--verbose", "--dir", "/srv/app", "--docker", "podman", "build",
        ])
        .unwrap();
        let global = GlobalOptions::from_cli(&cli);
        assert_eq!(global.logger.level(), LogLevel::Verbose);
        assert_eq!(global.dir, Some(PathBuf::from("/srv/app")));
        assert_eq!(global.docker, "podman");
        assert!(!global.dry_run);

        let cli = Cli::try_parse_from(["dockflow", "--quiet", "validate"]).unwrap();
        let global = GlobalOptions::from_cli(&cli);
        assert!(global.quiet);
        assert_eq!(global.logger.level(), LogLevel::Quiet);
    }
}
