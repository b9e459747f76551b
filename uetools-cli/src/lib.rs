// uetools-cli/src/lib.rs
//
// Library portion of the uetools CLI application.
// Contains the top-level flags, the concrete commands and the glue that
// turns a parsed command line into a process exit status.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

use std::io::{self, IsTerminal};

use log::debug;
use uetools_core::{CoreConfig, Environment, USAGE_EXIT_CODE};

pub use cli::{Cli, CommandLine};
pub use commands::{CommandOptions, build_registry};
pub use error::{CliResult, exit_status};

/// Output settings derived from the top-level flags.
pub fn command_options(cli: &Cli, colored: bool) -> CommandOptions {
    CommandOptions {
        colored,
        progress: !cli.no_progress && io::stderr().is_terminal(),
        hide_verbose_logs: cli.verbose == 0,
        timestamps: cli.timestamps,
    }
}

/// Runs the requested command and returns the process exit status.
pub fn run(cli: &Cli, env: &dyn Environment, options: CommandOptions) -> i32 {
    exit_status(try_run(cli, env, options))
}

fn try_run(cli: &Cli, env: &dyn Environment, options: CommandOptions) -> CliResult<i32> {
    // Config errors surface only after the command name is known.
    let (config, config_error) = match CoreConfig::load(env) {
        Ok(config) => (config, None),
        Err(e) => (CoreConfig::default(), Some(e)),
    };
    debug!("Configuration: {:?}", config);
    let registry = build_registry(&config, env, options)?;

    let Some((name, tokens)) = cli.requested_command() else {
        terminal::write_commands(&mut io::stderr(), commands::PROGRAM, &registry.summaries())?;
        return Ok(USAGE_EXIT_CODE);
    };

    registry.resolve(name)?;
    if let Some(e) = config_error {
        return Err(e);
    }
    registry.dispatch(name, tokens, env, &mut io::stdout())
}
