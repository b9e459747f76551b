//! Observers of upload progress.

use std::sync::{Arc, Mutex};

/// Receives the cumulative number of bytes handed to the transport.
///
/// Values passed to `update` never decrease and never exceed the declared
/// total of the upload.
pub trait ProgressSink {
    fn update(&mut self, sent: u64);

    /// Called once when the source has been fully read or has failed.
    fn finish(&mut self) {}
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&mut self, _sent: u64) {}
}

/// Keeps every reported value. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    updates: Arc<Mutex<Vec<u64>>>,
    finished: Arc<Mutex<bool>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<u64> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.lock().map(|done| *done).unwrap_or(false)
    }
}

impl ProgressSink for RecordingProgress {
    fn update(&mut self, sent: u64) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(sent);
        }
    }

    fn finish(&mut self) {
        if let Ok(mut done) = self.finished.lock() {
            *done = true;
        }
    }
}
