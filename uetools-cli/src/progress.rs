// ============================================================================
// uetools-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Byte Progress Bar for Uploads
//
// `BarProgress` renders the cumulative byte counts reported by the core
// uploader as an indicatif bar on stderr. When stderr is not a terminal the
// bar is hidden.
//
// AI-ASSISTANT-INFO: indicatif-backed progress sink for uploads

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use uetools_core::upload::ProgressSink;

const TEMPLATE: &str =
    "{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Progress sink drawing a byte progress bar.
#[derive(Clone)]
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(total: u64, message: &str) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░ "));
        }
        bar.set_message(message.to_string());

        if std::io::stderr().is_terminal() {
            bar.enable_steady_tick(Duration::from_millis(100));
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressSink for BarProgress {
    fn update(&mut self, sent: u64) {
        self.bar.set_position(sent);
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}
