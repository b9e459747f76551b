// ============================================================================
// uetools-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for uetools-core
//
// This module defines the error taxonomy shared by the binder, the
// dispatcher, the process runner and the uploader.
//
// KEY COMPONENTS:
// - CoreError: Every failure the core can report
// - CoreResult: Result alias used throughout the crate
// - Helper constructors for launch/wait errors carrying the command line
//
// A non-zero exit of an external process is NOT an error: it travels as the
// `Ok(code)` of a command's `execute`.
//
// AI-ASSISTANT-INFO: Error types and exit code mapping

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status used for usage problems (unknown command, binding failures).
pub const USAGE_EXIT_CODE: i32 = 2;

/// Exit status used for every other fatal error.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Errors produced by uetools-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid or missing argument values. Raised before any side effect.
    #[error("{0}")]
    Binding(String),

    #[error("unknown command '{name}' (known commands: {})", .known.join(", "))]
    UnknownCommand { name: String, known: Vec<String> },

    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    /// The external executable could not be started at all.
    #[error("failed to launch `{command_line}`: {source}")]
    CommandStart {
        command_line: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for `{command_line}`: {source}")]
    CommandWait {
        command_line: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot read '{}': {source}", .path.display())]
    SourceFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chunk size must be at least 1 byte")]
    InvalidChunkSize,

    /// The registry answered with something other than HTTP 200.
    #[error("registry rejected the upload (HTTP {status}): {body}")]
    TransferFailed { status: u16, body: String },

    /// The connection dropped while the body was still being sent, usually
    /// because the registry answered early (e.g. 413) and hung up.
    #[error("registry closed the connection during upload to {url}: {source}")]
    UploadInterrupted {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP transfer failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("toolchain not found: {0}")]
    ToolchainNotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for uetools-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Process exit status a top-level entry point should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::Binding(_) | CoreError::UnknownCommand { .. } => USAGE_EXIT_CODE,
            _ => FAILURE_EXIT_CODE,
        }
    }

    /// True for errors raised before any external side effect happened.
    pub fn is_usage_error(&self) -> bool {
        self.exit_code() == USAGE_EXIT_CODE
    }
}

/// Builds a launch error for the given command line.
pub fn command_start_error(command_line: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::CommandStart {
        command_line: command_line.into(),
        source,
    }
}

/// Builds an error for a failed wait on a running process.
pub fn command_wait_error(command_line: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::CommandWait {
        command_line: command_line.into(),
        source,
    }
}

/// Shorthand for a binding error with a formatted message.
pub fn binding_error(message: impl Into<String>) -> CoreError {
    CoreError::Binding(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_map_to_exit_code_two() {
        assert_eq!(binding_error("missing").exit_code(), 2);
        let unknown = CoreError::UnknownCommand {
            name: "bogus".to_string(),
            known: vec!["client".to_string(), "publish".to_string()],
        };
        assert_eq!(unknown.exit_code(), 2);
        assert_eq!(
            unknown.to_string(),
            "unknown command 'bogus' (known commands: client, publish)"
        );
    }

    #[test]
    fn launch_and_transfer_errors_are_fatal() {
        let launch = command_start_error(
            "UnrealEditor Game.uproject",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(launch.exit_code(), 1);
        assert!(launch.to_string().contains("UnrealEditor Game.uproject"));

        let transfer = CoreError::TransferFailed {
            status: 403,
            body: "{\"message\":\"403 Forbidden\"}".to_string(),
        };
        assert_eq!(transfer.exit_code(), 1);
        assert!(transfer.to_string().contains("403 Forbidden"));
        assert!(!transfer.is_usage_error());
    }
}
