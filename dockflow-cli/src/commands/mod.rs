//! CLI command implementations.
//!
//! - `build`: Build the image locally
//! - `publish`: Build and push the image to the registry
//! - `validate`: Print the resolved target
//! - `completions`: Generate shell completion scripts

pub mod build;
pub mod completions;
pub mod publish;
pub mod validate;

pub use build::BuildCommand;
pub use completions::CompletionsCommand;
pub use publish::PublishCommand;
pub use validate::ValidateCommand;
