//! Progress display for corpus initialization and batch conversion

use crate::io::configuration::{PROGRESS_BAR_WIDTH, SPINNER_TICK_MS};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Images: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the initialization spinner and the per-image batch bar
pub struct ProgressManager {
    multi_progress: MultiProgress,
    spinner: Option<ProgressBar>,
    batch_bar: Option<ProgressBar>,
    completed: usize,
    failed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            spinner: None,
            batch_bar: None,
            completed: 0,
            failed: 0,
        }
    }

    /// Show a spinner while the corpus for `tile_resolution` initializes
    pub fn start_initialization(&mut self, directory: &Path, tile_resolution: u32) {
        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(SPINNER_STYLE.clone());
        spinner.set_message(format!(
            "Indexing {} at {tile_resolution}px",
            directory.display()
        ));
        spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        self.spinner = Some(spinner);
    }

    /// Replace the spinner with a summary of the loaded corpus
    pub fn finish_initialization(&mut self, asset_count: usize) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("Indexed {asset_count} emoji"));
        }
    }

    /// Create the batch bar for `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        let batch_bar = ProgressBar::new(file_count as u64);
        batch_bar.set_style(BATCH_STYLE.clone());
        self.batch_bar = Some(self.multi_progress.add(batch_bar));
    }

    /// Show the image currently being converted
    pub fn start_file(&self, path: &Path) {
        if let Some(ref batch_bar) = self.batch_bar {
            let display_name = path.file_name().unwrap_or_default().to_string_lossy();
            batch_bar.set_message(display_name.to_string());
        }
    }

    /// Count a finished image, successful or not
    pub fn complete_file(&mut self, succeeded: bool) {
        if succeeded {
            self.completed += 1;
        } else {
            self.failed += 1;
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Number of images converted so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Number of images that failed so far
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Close every progress display with a final summary
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message(format!(
                "{} converted, {} failed",
                self.completed, self.failed
            ));
        }
    }
}
