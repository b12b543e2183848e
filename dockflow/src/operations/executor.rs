//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans and runs
//! their commands, in order, through a [`CommandRunner`].

use crate::error::{Error, Result};
use crate::run::CommandRunner;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no commands run).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
        }
    }
}

/// Runs operation plans.
///
/// The executor stops at the first command that fails. Commands already run
/// are not undone.
///
/// # Examples
///
/// ```
/// use dockflow::operations::{BuildOptions, BuildPlan, PlanExecutor};
/// use dockflow::run::RecordingRunner;
/// use dockflow::ResolvedTarget;
///
/// let target = ResolvedTarget::new("api", "1.0.0", None, "Dockerfile").unwrap();
/// let plan = BuildPlan::new(BuildOptions::new()).build_plan(&target).unwrap();
///
/// let runner = RecordingRunner::new();
/// let result = PlanExecutor::new(&runner).execute(&plan).unwrap();
/// assert!(result.success);
/// assert_eq!(runner.commands().len(), 1);
///
/// // Dry-run execution
/// let runner = RecordingRunner::new();
/// let result = PlanExecutor::new(&runner).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// assert!(runner.commands().is_empty());
/// ```
pub struct PlanExecutor<'a> {
    runner: &'a dyn CommandRunner,
    dry_run: bool,
    before_each: Option<fn(&PlanAction)>,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            dry_run: false,
            before_each: None,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan but runs nothing.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Calls `callback` with each action just before its command runs.
    #[must_use]
    pub fn before_each(mut self, callback: fn(&PlanAction)) -> Self {
        self.before_each = Some(callback);
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandExecutionFailed`] for the first command that
    /// exits unsuccessfully, or the runner's error if a command cannot be
    /// started. Later actions are not run.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::from_plan(plan, true));
        }

        for (index, action) in plan.actions.iter().enumerate() {
            if let Some(callback) = self.before_each {
                callback(action);
            }

            let command = action.command();
            let status = self.runner.run(command)?;
            if !status.success() {
                log::debug!(
                    "step {} of {} failed; stopping",
                    index + 1,
                    plan.actions.len()
                );
                return Err(Error::CommandExecutionFailed {
                    command: command.to_string(),
                    code: status.code(),
                });
            }
        }

        Ok(ExecutionResult::from_plan(plan, false))
    }
}
