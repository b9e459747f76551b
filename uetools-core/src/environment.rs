//! Read-only access to environment variables and the working directory.
//!
//! Argument defaults and configuration resolution never touch
//! `std::env` directly; they receive an `Environment` so tests can supply a
//! fixed set of values.

use std::collections::HashMap;
use std::path::PathBuf;

/// Source of environment variables and the current working directory.
pub trait Environment {
    /// Returns the value of `key`. Empty values are reported as absent.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the working directory, if it can be determined.
    fn current_dir(&self) -> Option<PathBuf>;

    /// True when `key` is set to a non-empty value.
    fn is_set(&self, key: &str) -> bool {
        self.var(key).is_some()
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }

    fn current_dir(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }
}

/// A fixed environment, used by tests and by embedders that resolve
/// arguments for a different process.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
    current_dir: Option<PathBuf>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|value| !value.is_empty()).cloned()
    }

    fn current_dir(&self) -> Option<PathBuf> {
        self.current_dir.clone()
    }
}
