#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # dockflow
//!
//! A library for building and publishing container images from a project's
//! `dockflow.json` and `package.json`.
//!
//! Resolution is pure: an [`environment::Environment`] (working directory,
//! file source, environment variables) goes in, a [`ResolvedTarget`] comes
//! out. Operations turn a target into an [`OperationPlan`] of external
//! commands, which a [`PlanExecutor`] runs in order.
//!
//! ## Core Types
//!
//! - [`ResolvedTarget`] and [`resolve_target`]: image coordinates
//! - [`BuildPlan`], [`PublishPlan`] and [`PlanExecutor`]: operations
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use dockflow::environment::{Environment, MemoryFileSource};
//! use dockflow::operations::{BuildOptions, BuildPlan};
//! use dockflow::resolve_target;
//!
//! let files = MemoryFileSource::new()
//!     .with_file("/app/package.json", r#"{"name":"web","version":"1.2.0"}"#);
//! let env = Environment::new("/app", &files);
//!
//! let target = resolve_target(&env, None).unwrap();
//! let plan = BuildPlan::new(BuildOptions::new()).build_plan(&target).unwrap();
//! assert_eq!(
//!     plan.actions[0].command().flag_values("-t"),
//!     vec!["web", "web:1.2.0", "web:latest"]
//! );
//! ```

pub mod action;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod operations;
pub mod registry;
pub mod run;
pub mod sanitize;
pub mod target;
pub mod version;

// Re-export key types at crate root for convenience
pub use action::Action;
pub use environment::{Environment, FileSource, MemoryFileSource, OsFileSource};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    BuildOptions, BuildPlan, ExecutionResult, OperationPlan, PlanAction, PlanExecutor,
    PublishOptions, PublishPlan,
};
pub use sanitize::sanitize;
pub use target::{resolve_target, ResolvedTarget};
