//! Main entry point for the dockflow CLI.
//!
//! dockflow builds and publishes container images described by a project's
//! `dockflow.json` and `package.json`:
//! - `build`: Build the image locally
//! - `publish`: Build and push the image to the registry
//! - `validate`: Print the resolved image coordinates
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Convert CLI args to GlobalOptions and initialize logging
    let global = GlobalOptions::from_cli(&cli);

    // Execute the command
    let result = match cli.command {
        cli::Command::Build(cmd) => cmd.execute(&global),
        cli::Command::Publish(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
