//! Build command implementation.
//!
//! This module implements the `build` command, which builds the image
//! locally tagged with its bare name, version and `latest`.

use crate::error::CliError;
use crate::utils::{echo_command, print_dry_run, print_warnings, resolve, GlobalOptions};
use clap::Args;
use dockflow::run::ProcessRunner;
use dockflow::{BuildOptions, BuildPlan, OsFileSource, PlanExecutor};

/// Build the image locally.
#[derive(Args)]
pub struct BuildCommand {
    /// Extra arguments passed verbatim to the build tool
    #[arg(
        value_name = "DOCKER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub docker_args: Vec<String>,
}

impl BuildCommand {
    /// Execute the build command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Resolve target
        let project = resolve(global, &OsFileSource, None)?;
        let target = &project.target;

        // 2. Plan
        let options = BuildOptions::new()
            .with_tool(global.docker.clone())
            .with_extra_args(self.docker_args);
        let plan = BuildPlan::new(options).build_plan(target)?;

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

        global
            .logger
            .info(&format!("Built {}", target.local_reference(target.version())));
        Ok(())
    }
}
