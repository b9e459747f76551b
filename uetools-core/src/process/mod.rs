//! External process execution with pluggable line formatting.
//!
//! [`ProcessRunner`] launches one [`Invocation`] at a time, blocks until it
//! exits, and echoes each output line through a [`LineFormatter`].

mod formatter;
mod invocation;
mod runner;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

pub use formatter::{
    LineFormatter, LogLine, PassthroughFormatter, TimestampFormatter, UnrealLogFormatter,
    Verbosity, parse_log_line,
};
pub use invocation::Invocation;
pub use runner::{
    ChildProcess, ProcessRunner, ProcessSpawner, RunMode, SystemProcess, SystemSpawner, exit_code,
};
