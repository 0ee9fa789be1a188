//! Progress reporting module

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for windowed reads
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize the byte progress bar for a resource of `total_bytes`
    pub fn init_bytes(&mut self, total_bytes: u64, name: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let pb = ProgressBar::new(total_bytes);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")?
                .progress_chars("##-"),
        );
        pb.set_message(name.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
        Ok(())
    }

    /// Move the bar to the cumulative offset of the last window
    pub fn window_read(&self, offset: u64) {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(offset);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }

    /// Abandon the bar after a failure
    pub fn abandon(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon_with_message("Failed");
        }
    }
}
