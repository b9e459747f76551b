// ============================================================================
// uetools-core/src/process/runner.rs
// ============================================================================
//
// PROCESS RUNNER: Launching External Tools and Streaming Their Output
//
// This module runs one external process to completion, forwarding its
// combined stdout/stderr line by line through a `LineFormatter`.
//
// KEY COMPONENTS:
// - ChildProcess: Trait representing a running process
// - ProcessSpawner: Trait for creating processes
// - SystemSpawner/SystemProcess: std::process implementation
// - ProcessRunner: Echo, dry-run, stream, wait, return the exit code
//
// ARCHITECTURE:
// The spawner traits are the seam for tests: the runner never touches
// std::process directly.
//
// AI-ASSISTANT-INFO: External process execution with formatted output

use super::formatter::LineFormatter;
use super::invocation::Invocation;
use crate::error::{CoreResult, command_start_error, command_wait_error};

use log::{debug, info, warn};
use std::io::{self, BufRead, BufReader, PipeReader, Write};
use std::process::{Child, ExitStatus, Stdio};

// --- Process Execution Abstraction ---

/// Trait representing a running external process.
pub trait ChildProcess {
    /// Feeds every output line, in production order, to `handler`. Returns
    /// when the output stream reaches end-of-file.
    fn for_each_line<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(&str) -> CoreResult<()>;

    /// Waits for the process to terminate and returns its exit code.
    fn wait(&mut self) -> CoreResult<i32>;
}

/// Trait representing something that can start a `ChildProcess`.
pub trait ProcessSpawner {
    type Process: ChildProcess;

    /// Starts the process. Failure to start is a launch error carrying the
    /// attempted command line.
    fn spawn(&self, invocation: &Invocation) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using std::process ---

/// Spawns real operating system processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

/// A child whose stdout and stderr share one pipe.
pub struct SystemProcess {
    child: Child,
    output: Option<BufReader<PipeReader>>,
    command_line: String,
}

impl ProcessSpawner for SystemSpawner {
    type Process = SystemProcess;

    fn spawn(&self, invocation: &Invocation) -> CoreResult<Self::Process> {
        let command_line = invocation.command_line();
        let (reader, writer) = io::pipe().map_err(|e| command_start_error(&command_line, e))?;
        let stderr_writer = writer
            .try_clone()
            .map_err(|e| command_start_error(&command_line, e))?;

        let mut command = std::process::Command::new(invocation.program());
        command
            .args(invocation.arguments())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(stderr_writer));
        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        let child = command
            .spawn()
            .map_err(|e| command_start_error(&command_line, e))?;
        // The Command still owns the parent's copies of the write end; the
        // reader only sees end-of-file once those are closed.
        drop(command);
        debug!("Spawned pid {} for `{}`", child.id(), command_line);

        Ok(SystemProcess {
            child,
            output: Some(BufReader::new(reader)),
            command_line,
        })
    }
}

impl ChildProcess for SystemProcess {
    fn for_each_line<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(&str) -> CoreResult<()>,
    {
        // Taking the reader closes our end on every exit path, so a child
        // still writing after an early return gets EPIPE instead of
        // blocking forever.
        let Some(mut reader) = self.output.take() else {
            return Ok(());
        };
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let text = String::from_utf8_lossy(&buf);
            let line = text.strip_suffix('\n').unwrap_or(&*text);
            let line = line.strip_suffix('\r').unwrap_or(line);
            handler(line)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<i32> {
        self.output.take();
        let status = self
            .child
            .wait()
            .map_err(|e| command_wait_error(&self.command_line, e))?;
        Ok(exit_code(status))
    }
}

/// Exit code of a finished process. On Unix a signal-terminated child
/// reports `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

// ============================================================================
// PROCESS RUNNER
// ============================================================================

/// Whether the runner actually launches the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Execute,
    /// Report the assembled command line and return 0 without spawning.
    DryRun,
}

impl RunMode {
    pub fn from_dry_flag(dry: bool) -> Self {
        if dry { RunMode::DryRun } else { RunMode::Execute }
    }
}

/// Runs one external process at a time and echoes its formatted output.
pub struct ProcessRunner<S, W = io::Stdout> {
    spawner: S,
    output: W,
}

impl<S: ProcessSpawner> ProcessRunner<S, io::Stdout> {
    /// Runner writing to the process's standard output.
    pub fn new(spawner: S) -> Self {
        Self {
            spawner,
            output: io::stdout(),
        }
    }
}

impl<S: ProcessSpawner, W: Write> ProcessRunner<S, W> {
    pub fn with_output(spawner: S, output: W) -> Self {
        Self { spawner, output }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs `invocation` to completion and returns its exit code unchanged.
    ///
    /// The shell-quoted command line is echoed first. In dry-run mode that
    /// is the only effect and the result is `Ok(0)`.
    pub fn run<F>(&mut self, invocation: &Invocation, formatter: &mut F, mode: RunMode) -> CoreResult<i32>
    where
        F: LineFormatter + ?Sized,
    {
        let command_line = invocation.command_line();
        writeln!(self.output, "{}", command_line)?;
        self.output.flush()?;

        if mode == RunMode::DryRun {
            info!("Dry run, not launching `{}`", command_line);
            return Ok(0);
        }

        info!("Launching `{}`", command_line);
        let mut process = self.spawner.spawn(invocation)?;

        let output = &mut self.output;
        let streamed = process.for_each_line(|line| {
            if let Some(formatted) = formatter.format_line(line) {
                writeln!(output, "{}", formatted)?;
                output.flush()?;
            }
            Ok(())
        });
        let code = process.wait()?;
        streamed?;

        if code == 0 {
            debug!("`{}` finished successfully", command_line);
        } else {
            warn!("`{}` exited with code {}", command_line, code);
        }
        Ok(code)
    }
}
