//! Command to resolve and print the image coordinates.

use crate::error::CliError;
use crate::utils::{resolve, GlobalOptions};
use clap::Args;
use dockflow::target::LATEST_TAG;
use dockflow::{OsFileSource, ResolvedTarget};
use serde::Serialize;

/// Resolve and print the image coordinates without running anything.
#[derive(Args)]
pub struct ValidateCommand {
    /// Print the resolved target as JSON
    #[arg(long)]
    pub json: bool,

    /// Resolve as if publishing this version
    #[arg(long = "version", value_name = "VERSION")]
    pub version_flag: Option<String>,
}

/// Serializable view of a resolved target.
#[derive(Debug, Serialize)]
struct TargetReport<'a> {
    image: &'a str,
    configured_image: &'a str,
    version: &'a str,
    registry: Option<&'a str>,
    dockerfile: &'a str,
    local_tags: Vec<String>,
    registry_tags: Vec<String>,
}

impl<'a> TargetReport<'a> {
    fn new(target: &'a ResolvedTarget) -> Self {
        let tags = [target.version(), LATEST_TAG];
        Self {
            image: target.image(),
            configured_image: target.configured_image(),
            version: target.version(),
            registry: target.registry(),
            dockerfile: target.dockerfile(),
            local_tags: tags.iter().map(|tag| target.local_reference(tag)).collect(),
            registry_tags: tags
                .iter()
                .filter_map(|tag| target.registry_reference(tag))
                .collect(),
        }
    }
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let project = resolve(global, &OsFileSource, self.version_flag.as_deref())?;
        let report = TargetReport::new(&project.target);

        if self.json {
            let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
            println!("{json}");
            return Ok(());
        }

        println!("image:      {}", report.image);
        if project.target.was_renamed() {
            println!("configured: {}", report.configured_image);
        }
        println!("version:    {}", report.version);
        println!("registry:   {}", report.registry.unwrap_or("(none)"));
        println!("dockerfile: {}", report.dockerfile);
        for tag in report.local_tags.iter().chain(&report.registry_tags) {
            println!("tag:        {tag}");
        }
        Ok(())
    }
}
