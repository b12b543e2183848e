//! Build and publish operations using the plan-execute pattern.
//!
//! Operations are split into two phases:
//! 1. **Planning**: resolves everything the operation needs (including the
//!    publish existence guard) and produces an ordered [`OperationPlan`]
//! 2. **Execution**: [`PlanExecutor`] runs each planned command and stops at
//!    the first failure
//!
//! # Examples
//!
//! ```
//! use dockflow::operations::{PlanExecutor, PublishOptions, PublishPlan};
//! use dockflow::registry::StaticExistenceChecker;
//! use dockflow::run::RecordingRunner;
//! use dockflow::ResolvedTarget;
//!
//! let target =
//!     ResolvedTarget::new("api", "1.0.0", Some("ghcr.io/acme".into()), "Dockerfile").unwrap();
//!
//! // Generate plan
//! let plan = PublishPlan::new(PublishOptions::new().with_force(true))
//!     .build_plan(&target, &StaticExistenceChecker::empty())
//!     .unwrap();
//!
//! // Execute plan
//! let runner = RecordingRunner::new();
//! let result = PlanExecutor::new(&runner).execute(&plan).unwrap();
//! assert_eq!(runner.commands().len(), 4);
//! ```

pub mod build;
pub mod executor;
pub mod plan;
pub mod publish;

pub use build::{BuildOptions, BuildPlan, DEFAULT_TOOL};
pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
pub use publish::{PublishOptions, PublishPlan};
