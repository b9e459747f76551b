// uetools-core/src/process/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::invocation::Invocation;
use super::runner::{ChildProcess, ProcessSpawner};
use crate::error::{CoreResult, command_start_error};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Replays scripted output lines and an exit code.
#[derive(Debug, Clone)]
pub struct MockProcess {
    lines: Vec<String>,
    exit_code: i32,
}

impl ChildProcess for MockProcess {
    fn for_each_line<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(&str) -> CoreResult<()>,
    {
        for line in &self.lines {
            handler(line)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<i32> {
        Ok(self.exit_code)
    }
}

#[derive(Debug, Default)]
struct Script {
    lines: Vec<String>,
    exit_code: i32,
    fail_launch: bool,
}

/// Spawner double that records every invocation it receives.
///
/// Clones share the script and the record, so a test can keep one handle
/// while a command owns another.
#[derive(Debug, Clone, Default)]
pub struct MockSpawner {
    script: Rc<RefCell<Script>>,
    received: Rc<RefCell<Vec<Invocation>>>,
}

impl MockSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script.borrow_mut().lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exit_code(self, exit_code: i32) -> Self {
        self.script.borrow_mut().exit_code = exit_code;
        self
    }

    /// Every spawn fails as if the executable did not exist.
    pub fn failing_launch(self) -> Self {
        self.script.borrow_mut().fail_launch = true;
        self
    }

    pub fn received(&self) -> Vec<Invocation> {
        self.received.borrow().clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.received.borrow().len()
    }
}

impl ProcessSpawner for MockSpawner {
    type Process = MockProcess;

    fn spawn(&self, invocation: &Invocation) -> CoreResult<Self::Process> {
        self.received.borrow_mut().push(invocation.clone());
        let script = self.script.borrow();
        if script.fail_launch {
            return Err(command_start_error(
                invocation.command_line(),
                io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            ));
        }
        Ok(MockProcess {
            lines: script.lines.clone(),
            exit_code: script.exit_code,
        })
    }
}
