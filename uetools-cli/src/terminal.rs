// ============================================================================
// uetools-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Colour Detection and User-Facing Messages
//
// KEY COMPONENTS:
// - Colour state: decided once at start-up, read everywhere else
// - print_error: The single place fatal errors are shown to the operator
// - write_commands: Listing shown when no command is given
//
// AI-ASSISTANT-INFO: Terminal styling and message output for the CLI

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use uetools_core::Environment;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(false);

/// Decides whether output should be coloured.
///
/// Colour is off with `--no-color`, when `NO_COLOR` is set, or when stdout
/// is not a colour-capable terminal.
pub fn should_use_color(no_color_flag: bool, env: &dyn Environment) -> bool {
    !no_color_flag
        && !env.is_set("NO_COLOR")
        && supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn set_color_enabled(enabled: bool) {
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn color_enabled() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
}

/// Print an error message with red styling
pub fn print_error(message: &str) {
    if color_enabled() {
        eprintln!("{} {}", "Error:".bold().bright_red(), message);
    } else {
        eprintln!("Error: {}", message);
    }
}

/// Writes the usage line and the registered commands.
pub fn write_commands<W: Write>(
    out: &mut W,
    program: &str,
    commands: &[(&'static str, &'static str)],
) -> io::Result<()> {
    writeln!(
        out,
        "Usage: {} [-v...] [--no-color] [--no-progress] [--timestamps] <COMMAND> [ARGS]...",
        program
    )?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    let width = commands.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, about) in commands {
        if color_enabled() {
            writeln!(out, "  {:<width$}  {}", name.bold(), about, width = width)?;
        } else {
            writeln!(out, "  {:<width$}  {}", name, about, width = width)?;
        }
    }
    out.flush()
}
