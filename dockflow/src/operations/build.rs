//! Build operation planning.
//!
//! A local build is a single build invocation tagging the image three ways:
//! bare name, `name:version` and `name:latest`.

use crate::error::Result;
use crate::run::CommandLine;
use crate::target::{ResolvedTarget, LATEST_TAG};
use crate::Action;

use super::plan::{OperationPlan, PlanAction};

/// Build tool used when none is configured.
pub const DEFAULT_TOOL: &str = "docker";

/// Build context passed to the build tool.
pub const BUILD_CONTEXT: &str = ".";

/// Build argument carrying the resolved version into the Dockerfile.
pub const VERSION_BUILD_ARG: &str = "BUILD_VERSION";

/// Options for a build operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Build tool binary, e.g. `docker` or `podman`.
    pub tool: String,

    /// Arguments passed verbatim to the build invocation.
    pub extra_args: Vec<String>,
}

impl BuildOptions {
    /// Creates options using `docker` and no extra arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::operations::BuildOptions;
    ///
    /// let options = BuildOptions::new().with_extra_args(vec!["--no-cache".to_string()]);
    /// assert_eq!(options.tool, "docker");
    /// assert_eq!(options.extra_args, vec!["--no-cache"]);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            extra_args: Vec::new(),
        }
    }

    /// Sets the build tool.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Sets the pass-through arguments.
    #[must_use]
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A build plan generator.
pub struct BuildPlan {
    options: BuildOptions,
}

impl BuildPlan {
    /// Creates a new build plan with the given options.
    #[must_use]
    pub const fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Builds the operation plan for `target`.
    ///
    /// No registry is needed; a configured one is ignored.
    ///
    /// # Errors
    ///
    /// Currently infallible; returns `Result` for symmetry with
    /// [`crate::operations::PublishPlan::build_plan`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::operations::{BuildOptions, BuildPlan};
    /// use dockflow::ResolvedTarget;
    ///
    /// let target = ResolvedTarget::new("api", "1.0.0", None, "Dockerfile").unwrap();
    /// let plan = BuildPlan::new(BuildOptions::new()).build_plan(&target).unwrap();
    ///
    /// assert_eq!(plan.len(), 1);
    /// assert_eq!(
    ///     plan.actions[0].command().to_string(),
    ///     "docker build -f Dockerfile --build-arg BUILD_VERSION=1.0.0 -t api -t api:1.0.0 -t api:latest ."
    /// );
    /// ```
    pub fn build_plan(&self, target: &ResolvedTarget) -> Result<OperationPlan> {
        let tags = [
            target.image().to_string(),
            target.local_reference(target.version()),
            target.local_reference(LATEST_TAG),
        ];

        let command = build_command(
            &self.options.tool,
            target,
            &self.options.extra_args,
            &tags,
        );

        let plan = OperationPlan::new(
            Action::Build,
            format!("Build {}", target.local_reference(target.version())),
        )
        .add_action(PlanAction::Build(command));

        Ok(add_target_warnings(plan, target))
    }
}

/// The single build invocation shared by build and publish plans.
pub(crate) fn build_command(
    tool: &str,
    target: &ResolvedTarget,
    extra_args: &[String],
    tags: &[String],
) -> CommandLine {
    let mut command = CommandLine::new(tool)
        .arg("build")
        .arg("-f")
        .arg(target.dockerfile())
        .arg("--build-arg")
        .arg(format!("{VERSION_BUILD_ARG}={}", target.version()))
        .args(extra_args.iter().cloned());

    for tag in tags {
        command = command.arg("-t").arg(tag.as_str());
    }

    command.arg(BUILD_CONTEXT)
}

/// Warnings every plan carries for the target it was built from.
pub(crate) fn add_target_warnings(mut plan: OperationPlan, target: &ResolvedTarget) -> OperationPlan {
    if target.was_renamed() {
        plan = plan.add_warning(format!(
            "image name '{}' was normalized to '{}'",
            target.configured_image(),
            target.image()
        ));
    }
    plan
}
