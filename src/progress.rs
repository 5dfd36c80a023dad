//! Progress display using indicatif
//!
//! Small wrapper so the converter can show per-job progress and an input
//! spinner without sprinkling enable checks everywhere. Disabled trackers
//! hand out `None` and every helper accepts that quietly.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

pub struct ProgressTracker {
    enabled: bool,
}

impl ProgressTracker {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Bar over a known number of output jobs
    pub fn job_bar(&self, total: usize, operation: &str) -> Option<ProgressBar> {
        if !self.enabled || total == 0 {
            return None;
        }

        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        bar.set_message(format!("{}...", operation));
        bar.enable_steady_tick(Duration::from_millis(100));

        info!("Started progress tracking for: {}", operation);
        Some(bar)
    }

    /// Spinner for indeterminate work, like reading the source drawing
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    }

    pub fn advance(bar: &Option<ProgressBar>, message: Option<&str>) {
        if let Some(bar) = bar {
            bar.inc(1);
            if let Some(message) = message {
                bar.set_message(message.to_string());
            }
        }
    }

    pub fn finish(bar: Option<ProgressBar>, message: &str) {
        if let Some(bar) = bar {
            bar.finish_with_message(message.to_string());
            info!("Progress completed: {}", message);
        }
    }
}
