//! Publish command implementation.
//!
//! This module implements the `publish` command: log in, build with local
//! and registry tags, push the version tag, then push `latest`.

use crate::error::CliError;
use crate::utils::{echo_command, print_dry_run, print_warnings, resolve, GlobalOptions};
use clap::Args;
use dockflow::registry::DockerManifestChecker;
use dockflow::run::ProcessRunner;
use dockflow::target::LATEST_TAG;
use dockflow::{OsFileSource, PlanExecutor, PublishOptions, PublishPlan};

/// Build, tag and push the image to the configured registry.
#[derive(Args)]
pub struct PublishCommand {
    /// Publish even if the version already exists in the registry
    #[arg(long)]
    pub force: bool,

    /// Version to publish, overriding the configured one
    #[arg(long = "version", value_name = "VERSION")]
    pub version_flag: Option<String>,

    /// Version to publish (same as --version)
    #[arg(value_name = "VERSION", conflicts_with = "version_flag")]
    pub positional_version: Option<String>,
}

impl PublishCommand {
    /// The version given on the command line, in either form.
    pub fn requested_version(&self) -> Option<&str> {
        self.version_flag
            .as_deref()
            .or(self.positional_version.as_deref())
    }

    /// Execute the publish command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Resolve target
        let project = resolve(global, &OsFileSource, self.requested_version())?;
        let target = &project.target;

        // 2. Plan (runs the existence guard unless forced)
        let checker = DockerManifestChecker::new(global.docker.clone());
        let options = PublishOptions::new()
            .with_tool(global.docker.clone())
            .with_force(self.force);
        let plan = PublishPlan::new(options).build_plan(target, &checker)?;

        if global.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        print_warnings(&plan.warnings, global);

        // 3. Run
        let runner = ProcessRunner::new().in_dir(&project.working_dir);
        PlanExecutor::new(&runner)
            .before_each(echo_command)
            .execute(&plan)?;

        if let Some(reference) = target.registry_reference(target.version()) {
            println!("Published {reference} and {LATEST_TAG}");
        }
        Ok(())
    }
}
