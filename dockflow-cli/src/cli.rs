//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{BuildCommand, CompletionsCommand, PublishCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for building and publishing container images.
#[derive(Parser)]
#[command(name = "dockflow")]
#[command(version, about = "Build and publish container images", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Project directory containing dockflow.json / package.json
    #[arg(long, value_name = "PATH", global = true, env = "DOCKFLOW_DIR")]
    pub dir: Option<PathBuf>,

    /// Container build tool to invoke
    #[arg(
        long,
        value_name = "BIN",
        global = true,
        env = "DOCKFLOW_DOCKER",
        default_value = dockflow::operations::DEFAULT_TOOL
    )]
    pub docker: String,

    /// Print the planned commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Build the image locally
    Build(BuildCommand),

    /// Build, tag and push the image to the configured registry
    Publish(PublishCommand),

    /// Resolve and print the image coordinates without running anything
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
