//! Build script for dockflow-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs and src/commands/; `tests/man_page.rs`
/// compares the two trees.
pub(crate) fn build_cli() -> Command {
    Command::new("dockflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and publish container images")
        .long_about(
            "Build and publish container images using the image name, registry and version \
             declared in dockflow.json and package.json",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .help("Project directory containing dockflow.json / package.json")
                .value_name("PATH")
                .global(true)
                .env("DOCKFLOW_DIR"),
        )
        .arg(
            Arg::new("docker")
                .long("docker")
                .help("Container build tool to invoke")
                .value_name("BIN")
                .global(true)
                .default_value("docker")
                .env("DOCKFLOW_DOCKER"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the planned commands instead of running them")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("build")
                .about("Build the image locally")
                .long_about(
                    "Build the image tagged <image>, <image>:<version> and <image>:latest. \
                     Trailing arguments are passed to the build tool unchanged.",
                )
                .arg(
                    Arg::new("docker-args")
                        .value_name("DOCKER_ARGS")
                        .help("Extra arguments passed verbatim to the build tool")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true),
                ),
            Command::new("publish")
                .about("Build, tag and push the image to the configured registry")
                .long_about(
                    "Log in, build with local and registry tags, then push the version tag \
                     and latest. Refuses to overwrite an existing version unless --force is given.",
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Publish even if the version already exists in the registry")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("version-flag")
                        .long("version")
                        .value_name("VERSION")
                        .help("Version to publish, overriding the configured one"),
                )
                .arg(
                    Arg::new("positional-version")
                        .value_name("VERSION")
                        .help("Version to publish (same as --version)")
                        .conflicts_with("version-flag"),
                ),
            Command::new("validate")
                .about("Resolve and print the image coordinates without running anything")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the resolved target as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("version-flag")
                        .long("version")
                        .value_name("VERSION")
                        .help("Resolve as if publishing this version"),
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .help("Shell to generate completions for")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"]),
                ),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(
        std::env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?,
    );
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("dockflow.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
