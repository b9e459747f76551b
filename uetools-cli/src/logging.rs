// ============================================================================
// uetools-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialization for the CLI
//
// The core library logs through the `log` facade only. This module installs
// the backend once at start-up.
//
// USAGE:
// - default: warnings and errors only
// - -v: info (launches, upload targets)
// - -vv: debug (binding sources, spawned pids)
// - RUST_LOG overrides the level chosen by the flags
//
// Records go to stderr so that echoed process output on stdout stays clean.
//
// AI-ASSISTANT-INFO: Logging backend configuration

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use std::io::Write;

/// Level selected by the number of `-v` flags.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Installs env_logger. Calling it twice is harmless.
pub fn init(verbosity: u8, colored: bool) {
    let level = level_for_verbosity(verbosity);
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| {
            let label = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN ",
                Level::Info => "INFO ",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            if !colored {
                return writeln!(buf, "{} {}", label, record.args());
            }
            let label = match record.level() {
                Level::Error => label.bright_red().to_string(),
                Level::Warn => label.yellow().to_string(),
                Level::Info => label.green().to_string(),
                Level::Debug => label.blue().to_string(),
                Level::Trace => label.magenta().to_string(),
            };
            writeln!(buf, "{} {}", label, record.args())
        });

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized with level: {}", level);
    }
}
