//! Command implementations for the CLI.
//!
//! Each submodule contains one command. [`build_registry`] is the single
//! place where commands are registered with the core dispatcher.

pub mod client;
pub mod editor;
pub mod publish;
pub mod shared;

use std::path::PathBuf;
use std::rc::Rc;

use uetools_core::command::CommandRegistry;
use uetools_core::process::SystemSpawner;
use uetools_core::project::{ProjectLocator, ToolchainLocator};
use uetools_core::{CoreConfig, CoreResult, Environment};

pub use client::ClientCommand;
pub use editor::EditorCommand;
pub use publish::PublishCommand;
pub use shared::{CommandOptions, EditorLauncher};

/// Binary name used in usage lines.
pub const PROGRAM: &str = "uecli";

/// Registers every command. Runs once at start-up.
pub fn build_registry(
    config: &CoreConfig,
    env: &dyn Environment,
    options: CommandOptions,
) -> CoreResult<CommandRegistry> {
    let working_dir = env.current_dir().unwrap_or_else(|| PathBuf::from("."));
    let projects: Rc<dyn ProjectLocator> = Rc::new(config.project_locator(working_dir));
    let toolchain: Rc<dyn ToolchainLocator> = Rc::new(config.toolchain());

    let launcher = EditorLauncher::new(toolchain, Rc::clone(&projects), SystemSpawner, options);

    let mut registry = CommandRegistry::new(PROGRAM);
    registry.register(ClientCommand::new(launcher.clone()))?;
    registry.register(EditorCommand::new(launcher))?;
    registry.register(PublishCommand::new(
        projects,
        config.registry_url(),
        env.is_set(publish::JOB_TOKEN_VAR),
        options.progress,
    ))?;
    Ok(registry)
}
