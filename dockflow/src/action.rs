//! The top-level actions dockflow performs.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// What the invocation should do with the resolved target.
///
/// # Examples
///
/// ```
/// use dockflow::Action;
///
/// assert_eq!("publish".parse::<Action>().unwrap(), Action::Publish);
/// assert!("deploy".parse::<Action>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Build and tag the image locally.
    Build,
    /// Build, tag and push the image to the configured registry.
    Publish,
}

impl Action {
    /// The lowercase action name as typed on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Self::Build),
            "publish" => Ok(Self::Publish),
            other => Err(Error::InvalidUsage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_actions() {
        assert_eq!("build".parse::<Action>().unwrap(), Action::Build);
        assert_eq!("publish".parse::<Action>().unwrap(), Action::Publish);
    }

    #[test]
    fn test_parse_is_exact() {
        for input in ["", "Build", "PUBLISH", " build", "push"] {
            assert!(
                matches!(input.parse::<Action>(), Err(Error::InvalidUsage(_))),
                "{input:?} should be invalid usage"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for action in [Action::Build, Action::Publish] {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }
}
