//! Publish operation planning.
//!
//! Publishing logs in to the registry, builds once with local and registry
//! tags, then pushes the version tag followed by `latest`. The existence
//! guard runs while planning so a tripped guard produces no commands.

use crate::error::{Error, Result};
use crate::registry::{login_host, ExistenceChecker};
use crate::run::CommandLine;
use crate::target::{ResolvedTarget, LATEST_TAG};
use crate::Action;

use super::build::{add_target_warnings, build_command, DEFAULT_TOOL};
use super::plan::{OperationPlan, PlanAction};

/// Options for a publish operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    /// Build tool binary, e.g. `docker` or `podman`.
    pub tool: String,

    /// Skip the existence guard and overwrite an existing tag.
    pub force: bool,
}

impl PublishOptions {
    /// Creates options using `docker` with the guard enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            force: false,
        }
    }

    /// Sets the build tool.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Sets the force flag.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A publish plan generator.
pub struct PublishPlan {
    options: PublishOptions,
}

impl PublishPlan {
    /// Creates a new publish plan with the given options.
    #[must_use]
    pub const fn new(options: PublishOptions) -> Self {
        Self { options }
    }

    /// Builds the operation plan for `target`.
    ///
    /// Actions are, in order: login, one build tagging
    /// `image:version`, `image:latest`, `registry/image:version` and
    /// `registry/image:latest`, push of the version tag, push of `latest`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRegistry`] if the target has no registry, or
    /// [`Error::VersionAlreadyExists`] if the guard finds the version tag
    /// already published and `force` is not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::operations::{PlanAction, PublishOptions, PublishPlan};
    /// use dockflow::registry::StaticExistenceChecker;
    /// use dockflow::ResolvedTarget;
    ///
    /// let target =
    ///     ResolvedTarget::new("api", "1.0.0", Some("ghcr.io/acme".into()), "Dockerfile").unwrap();
    /// let plan = PublishPlan::new(PublishOptions::new())
    ///     .build_plan(&target, &StaticExistenceChecker::empty())
    ///     .unwrap();
    ///
    /// assert_eq!(plan.len(), 4);
    /// assert!(matches!(plan.actions[0], PlanAction::Login(_)));
    /// ```
    pub fn build_plan(
        &self,
        target: &ResolvedTarget,
        checker: &dyn ExistenceChecker,
    ) -> Result<OperationPlan> {
        let registry = target.registry().ok_or(Error::MissingRegistry)?;
        let tool = self.options.tool.as_str();

        if self.options.force {
            log::debug!("skipping existence check for {target} (forced)");
        } else if checker.exists(registry, target.image(), target.version()) {
            return Err(Error::VersionAlreadyExists {
                reference: format!("{registry}/{}:{}", target.image(), target.version()),
            });
        }

        let version_ref = format!("{registry}/{}:{}", target.image(), target.version());
        let latest_ref = format!("{registry}/{}:{LATEST_TAG}", target.image());

        let login = match login_host(registry) {
            Some(host) => CommandLine::new(tool).arg("login").arg(host),
            None => CommandLine::new(tool).arg("login"),
        };

        let tags = [
            target.local_reference(target.version()),
            target.local_reference(LATEST_TAG),
            version_ref.clone(),
            latest_ref.clone(),
        ];

        let mut plan = OperationPlan::new(Action::Publish, format!("Publish {version_ref}"))
            .add_action(PlanAction::Login(login))
            .add_action(PlanAction::Build(build_command(tool, target, &[], &tags)))
            .add_action(PlanAction::Push(
                CommandLine::new(tool).arg("push").arg(version_ref),
            ))
            .add_action(PlanAction::Push(
                CommandLine::new(tool).arg("push").arg(latest_ref),
            ));

        if target.version() == LATEST_TAG {
            plan = plan.add_warning(
                "publishing version 'latest'; the version and latest tags are the same",
            );
        }
        if self.options.force {
            plan = plan.add_warning(format!(
                "existence check skipped; an existing {registry}/{}:{} will be overwritten",
                target.image(),
                target.version()
            ));
        }

        Ok(add_target_warnings(plan, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticExistenceChecker;

    fn target(registry: Option<&str>) -> ResolvedTarget {
        ResolvedTarget::new("api", "1.0.0", registry.map(String::from), "Dockerfile").unwrap()
    }

    fn rendered(plan: &OperationPlan) -> Vec<String> {
        plan.commands().map(ToString::to_string).collect()
    }

    #[test]
    fn test_publish_full_sequence() {
        let plan = PublishPlan::new(PublishOptions::new())
            .build_plan(&target(Some("r.io")), &StaticExistenceChecker::empty())
            .unwrap();

        assert_eq!(plan.action, Action::Publish);
        assert_eq!(
            rendered(&plan),
            vec![
                "docker login r.io",
                "docker build -f Dockerfile --build-arg BUILD_VERSION=1.0.0 \
                 -t api:1.0.0 -t api:latest -t r.io/api:1.0.0 -t r.io/api:latest .",
                "docker push r.io/api:1.0.0",
                "docker push r.io/api:latest",
            ]
        );
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_publish_requires_registry() {
        let err = PublishPlan::new(PublishOptions::new())
            .build_plan(&target(None), &StaticExistenceChecker::empty())
            .unwrap_err();
        assert!(matches!(err, Error::MissingRegistry));
    }

    #[test]
    fn test_guard_blocks_existing_version() {
        let checker = StaticExistenceChecker::new(["r.io/api:1.0.0"]);
        let err = PublishPlan::new(PublishOptions::new())
            .build_plan(&target(Some("r.io")), &checker)
            .unwrap_err();

        match err {
            Error::VersionAlreadyExists { reference } => assert_eq!(reference, "r.io/api:1.0.0"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_force_skips_guard() {
        let checker = StaticExistenceChecker::new(["r.io/api:1.0.0"]);
        let plan = PublishPlan::new(PublishOptions::new().with_force(true))
            .build_plan(&target(Some("r.io")), &checker)
            .unwrap();

        assert_eq!(plan.len(), 4);
        assert!(plan.warnings.iter().any(|w| w.contains("overwritten")));
    }

    #[test]
    fn test_docker_hub_namespace_logs_in_to_default() {
        let plan = PublishPlan::new(PublishOptions::new())
            .build_plan(&target(Some("acme")), &StaticExistenceChecker::empty())
            .unwrap();

        assert_eq!(plan.actions[0].command().to_string(), "docker login");
        assert_eq!(
            plan.actions[2].command().to_string(),
            "docker push acme/api:1.0.0"
        );
    }

    #[test]
    fn test_nested_registry_path_logs_in_to_host() {
        let plan = PublishPlan::new(PublishOptions::new().with_tool("podman"))
            .build_plan(
                &target(Some("ghcr.io/acme/team")),
                &StaticExistenceChecker::empty(),
            )
            .unwrap();

        assert_eq!(plan.actions[0].command().to_string(), "podman login ghcr.io");
        assert_eq!(
            plan.actions[3].command().to_string(),
            "podman push ghcr.io/acme/team/api:latest"
        );
    }

    #[test]
    fn test_latest_version_warns_and_duplicates_tags() {
        let target =
            ResolvedTarget::new("api", "latest", Some("r.io".into()), "Dockerfile").unwrap();
        let plan = PublishPlan::new(PublishOptions::new())
            .build_plan(&target, &StaticExistenceChecker::empty())
            .unwrap();

        assert_eq!(
            plan.actions[1].command().flag_values("-t"),
            vec!["api:latest", "api:latest", "r.io/api:latest", "r.io/api:latest"]
        );
        assert!(plan.warnings.iter().any(|w| w.contains("'latest'")));
    }
}
