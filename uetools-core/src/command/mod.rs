//! Command abstraction and the registry that dispatches to commands.
//!
//! A command is a named unit with an argument schema and an `execute`
//! capability. Commands are registered explicitly at start-up; there is no
//! discovery.

mod registry;

pub use registry::CommandRegistry;

use crate::args::{ArgumentSchema, Arguments};
use crate::error::CoreResult;

/// A named, independently invocable unit of behaviour.
pub trait Command {
    /// Unique name used on the command line.
    fn name(&self) -> &'static str;

    /// One-line description shown in help and command listings.
    fn about(&self) -> &'static str;

    /// Parameters accepted by this command.
    fn schema(&self) -> ArgumentSchema;

    /// Runs the command with fully bound arguments.
    ///
    /// `Ok(code)` carries the command's exit status, including a non-zero
    /// status reported by an external process. `Err` is reserved for fatal
    /// errors such as a failed launch or a rejected upload.
    fn execute(&self, args: &Arguments) -> CoreResult<i32>;
}
