//! Configuration system for dockflow.
//!
//! Configuration comes from two optional JSON files in the project directory
//! plus `DOCKFLOW_*` environment variables.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. CLI arguments (the publish version override, handled by
//!    [`crate::version::VersionResolver`])
//! 2. Environment variables (`DOCKFLOW_IMAGE`, `DOCKFLOW_REGISTRY`,
//!    `DOCKFLOW_VERSION`, `DOCKFLOW_DOCKERFILE`)
//! 3. Project config (`dockflow.json`)
//! 4. Package manifest (`package.json`: `name`, `version`)
//! 5. Built-in defaults (`version = "latest"`, `dockerfile = "Dockerfile"`)
//!
//! # Examples
//!
//! ```
//! use dockflow::config::{ConfigLoader, ConfigMerger, EnvironmentOverrides};
//! use dockflow::environment::{Environment, MemoryFileSource};
//!
//! let files = MemoryFileSource::new()
//!     .with_file("/app/dockflow.json", r#"{"registry":"ghcr.io/acme"}"#)
//!     .with_file("/app/package.json", r#"{"name":"web","version":"1.2.0"}"#);
//! let env = Environment::new("/app", &files).with_var("DOCKFLOW_VERSION", "1.2.1");
//!
//! let mut sources = ConfigLoader::load_sources(&env).unwrap();
//! EnvironmentOverrides::apply(&mut sources.project, &env);
//! let merged = ConfigMerger::merge(&sources);
//!
//! assert_eq!(merged.image.as_deref(), Some("web"));
//! assert_eq!(merged.version.as_deref(), Some("1.2.1"));
//! ```

pub mod loader;
pub mod merger;
pub mod overrides;
pub mod schema;

pub use loader::{ConfigLoader, ConfigSources};
pub use merger::{first_present, ConfigMerger, MergedConfig};
pub use overrides::EnvironmentOverrides;
pub use schema::{BuildConfig, PackageMetadata};
