//! Core library for the uetools command-line automation layer.
//!
//! This crate provides the shared infrastructure of every `uecli` command:
//! typed argument schemas and binding, the command registry, an external
//! process runner with pluggable line formatting, and a chunked uploader for
//! generic package registries.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use uetools_core::args::{Arguments, ArgumentSchema, FieldSpec};
//! use uetools_core::command::{Command, CommandRegistry};
//! use uetools_core::process::{Invocation, PassthroughFormatter, ProcessRunner, RunMode, SystemSpawner};
//! use uetools_core::{CoreResult, ProcessEnvironment};
//!
//! struct Echo;
//!
//! impl Command for Echo {
//!     fn name(&self) -> &'static str { "echo" }
//!     fn about(&self) -> &'static str { "Print a message through the runner" }
//!     fn schema(&self) -> ArgumentSchema {
//!         ArgumentSchema::new()
//!             .field(FieldSpec::string("message").positional().required())
//!             .field(FieldSpec::flag("dry"))
//!     }
//!     fn execute(&self, args: &Arguments) -> CoreResult<i32> {
//!         let invocation = Invocation::new("echo").arg(args.str("message")?);
//!         ProcessRunner::new(SystemSpawner).run(
//!             &invocation,
//!             &mut PassthroughFormatter,
//!             RunMode::from_dry_flag(args.flag("dry")),
//!         )
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new("uecli");
//! registry.register(Echo).unwrap();
//! let tokens = vec!["hello".to_string()];
//! let code = registry
//!     .dispatch("echo", &tokens, &ProcessEnvironment, &mut std::io::stdout())
//!     .unwrap();
//! std::process::exit(code);
//! ```

pub mod args;
pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod process;
pub mod project;
pub mod upload;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder, DEFAULT_API_URL};
pub use environment::{Environment, MapEnvironment, ProcessEnvironment};
pub use error::{CoreError, CoreResult, FAILURE_EXIT_CODE, USAGE_EXIT_CODE};
pub use project::{
    BUILD_PLATFORMS, EngineToolchain, ProjectFolder, ProjectLocator, ToolchainLocator,
    deduce_project, guess_platform, project_name,
};
