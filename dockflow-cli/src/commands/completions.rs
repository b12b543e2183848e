//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Installed binary name.
const BIN_NAME: &str = "dockflow";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            match self.shell {
                Shell::Bash => {
                    eprintln!("#   eval \"$({BIN_NAME} completions bash)\"");
                }
                Shell::Zsh => {
                    eprintln!("#   {BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}");
                }
                Shell::Fish => {
                    eprintln!("#   {BIN_NAME} completions fish | source");
                }
                Shell::PowerShell => {
                    eprintln!(
                        "#   {BIN_NAME} completions powershell | Out-String | Invoke-Expression"
                    );
                }
                _ => {}
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}
