// uetools-cli/src/main.rs
//
// Entry point of the `uecli` binary.
//
// Responsibilities:
// - Parsing the global flags.
// - Deciding on colour and installing the logger.
// - Handing the command to the library and exiting with its status.

use clap::Parser;
use std::process;
use uetools_cli::{Cli, command_options, logging, run, terminal};
use uetools_core::ProcessEnvironment;

fn main() {
    let cli = Cli::parse();
    let env = ProcessEnvironment;

    let colored = terminal::should_use_color(cli.no_color, &env);
    terminal::set_color_enabled(colored);
    logging::init(cli.verbose, colored);

    let options = command_options(&cli, colored);
    process::exit(run(&cli, &env, options));
}
