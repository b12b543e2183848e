//! Plan types for build and publish operations.
//!
//! A plan describes the external commands an operation will run, in order,
//! without running them.

use crate::run::CommandLine;
use crate::Action;

/// A single step of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Authenticate against the registry. May prompt for credentials.
    Login(CommandLine),

    /// Build the image and apply all tags in one invocation.
    Build(CommandLine),

    /// Push one registry tag.
    Push(CommandLine),
}

impl PlanAction {
    /// The command this action runs.
    #[must_use]
    pub fn command(&self) -> &CommandLine {
        match self {
            Self::Login(cmd) | Self::Build(cmd) | Self::Push(cmd) => cmd,
        }
    }

    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Login(cmd) => match cmd.get_args().get(1) {
                Some(host) => format!("Log in to {host}"),
                None => "Log in to the default registry".to_string(),
            },
            Self::Build(cmd) => {
                format!("Build image tagged {}", cmd.flag_values("-t").join(", "))
            }
            Self::Push(cmd) => match cmd.get_args().last() {
                Some(reference) => format!("Push {reference}"),
                None => "Push".to_string(),
            },
        }
    }
}

/// An ordered sequence of actions for one operation.
///
/// Plans are generated during the planning phase and can be inspected,
/// printed for a dry run, or executed. Execution order is the order of
/// `actions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// The operation this plan performs.
    pub action: Action,

    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockflow::operations::OperationPlan;
    /// use dockflow::Action;
    ///
    /// let plan = OperationPlan::new(Action::Build, "Build api:1.0.0");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(action: Action, description: impl Into<String>) -> Self {
        Self {
            action,
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the end of the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// The commands of all actions, in execution order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandLine> {
        self.actions.iter().map(PlanAction::command)
    }
}
