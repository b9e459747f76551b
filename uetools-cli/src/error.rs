// ============================================================================
// uetools-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Reporting Core Errors to the Operator
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - report: Prints an error once and yields the process exit status
//
// AI-ASSISTANT-INFO: CLI error handling utilities

use crate::terminal;
use log::debug;
use uetools_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Shows `error` on stderr and returns the exit status to use for it.
///
/// Usage errors exit with 2, every other fatal error with 1.
pub fn report(error: &CoreError) -> i32 {
    terminal::print_error(&error.to_string());
    debug!("{:?}", error);
    error.exit_code()
}

/// Collapses a CLI result into the process exit status.
pub fn exit_status(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => report(&e),
    }
}
