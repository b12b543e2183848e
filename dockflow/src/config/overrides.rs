//! Environment variable overrides for configuration.
//!
//! `DOCKFLOW_*` variables replace the corresponding `dockflow.json` keys.
//! They are read from the [`Environment`] snapshot, never from the process
//! directly.

use crate::config::schema::BuildConfig;
use crate::environment::Environment;

/// Overrides `image`.
pub const IMAGE_VAR: &str = "DOCKFLOW_IMAGE";
/// Overrides `registry`.
pub const REGISTRY_VAR: &str = "DOCKFLOW_REGISTRY";
/// Overrides `version`.
pub const VERSION_VAR: &str = "DOCKFLOW_VERSION";
/// Overrides `dockerfile`.
pub const DOCKERFILE_VAR: &str = "DOCKFLOW_DOCKERFILE";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```
/// use dockflow::config::{BuildConfig, EnvironmentOverrides};
/// use dockflow::environment::{Environment, MemoryFileSource};
///
/// let files = MemoryFileSource::new();
/// let env = Environment::new("/app", &files).with_var("DOCKFLOW_REGISTRY", "ghcr.io/acme");
///
/// let mut config = BuildConfig::default();
/// let applied = EnvironmentOverrides::apply(&mut config, &env);
/// assert_eq!(config.registry.as_deref(), Some("ghcr.io/acme"));
/// assert_eq!(applied, vec!["DOCKFLOW_REGISTRY"]);
/// ```
pub struct EnvironmentOverrides;

impl EnvironmentOverrides {
    /// Apply all non-empty `DOCKFLOW_*` overrides to `config`.
    ///
    /// Returns the names of the variables that were applied.
    pub fn apply(config: &mut BuildConfig, env: &Environment<'_>) -> Vec<&'static str> {
        let mut applied = Vec::new();

        for (var, field) in [
            (IMAGE_VAR, &mut config.image),
            (REGISTRY_VAR, &mut config.registry),
            (VERSION_VAR, &mut config.version),
            (DOCKERFILE_VAR, &mut config.dockerfile),
        ] {
            if let Some(value) = env.var(var).filter(|v| !v.trim().is_empty()) {
                log::debug!("{var} overrides dockflow.json");
                *field = Some(value.to_string());
                applied.push(var);
            }
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryFileSource;

    #[test]
    fn test_no_vars_no_changes() {
        let files = MemoryFileSource::new();
        let env = Environment::new("/app", &files);
        let mut config = BuildConfig {
            image: Some("api".into()),
            ..Default::default()
        };

        assert!(EnvironmentOverrides::apply(&mut config, &env).is_empty());
        assert_eq!(config.image.as_deref(), Some("api"));
    }

    #[test]
    fn test_all_vars_applied() {
        let files = MemoryFileSource::new();
        let env = Environment::new("/app", &files)
            .with_var(IMAGE_VAR, "from-env")
            .with_var(REGISTRY_VAR, "localhost:5000")
            .with_var(VERSION_VAR, "9.9.9")
            .with_var(DOCKERFILE_VAR, "Containerfile");
        let mut config = BuildConfig {
            image: Some("from-file".into()),
            ..Default::default()
        };

        let applied = EnvironmentOverrides::apply(&mut config, &env);
        assert_eq!(applied.len(), 4);
        assert_eq!(config.image.as_deref(), Some("from-env"));
        assert_eq!(config.registry.as_deref(), Some("localhost:5000"));
        assert_eq!(config.version.as_deref(), Some("9.9.9"));
        assert_eq!(config.dockerfile.as_deref(), Some("Containerfile"));
    }

    #[test]
    fn test_empty_var_ignored() {
        let files = MemoryFileSource::new();
        let env = Environment::new("/app", &files).with_var(VERSION_VAR, "");
        let mut config = BuildConfig {
            version: Some("1.0.0".into()),
            ..Default::default()
        };

        assert!(EnvironmentOverrides::apply(&mut config, &env).is_empty());
        assert_eq!(config.version.as_deref(), Some("1.0.0"));
    }
}
