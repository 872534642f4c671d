// file: src/pipeline/progress.rs
// description: batch progress display and run statistics for the enrichment pipeline
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentStats {
    pub total_records: usize,
    pub unique_channels: usize,
    pub avatars_found: usize,
    pub records_enriched: usize,
    pub batches_sent: usize,
    pub batches_failed: usize,
    pub channels_not_found: usize,
    pub dataset_path: PathBuf,
    pub backup_path: PathBuf,
    pub duration: Duration,
}

impl EnrichmentStats {
    /// Share of unique channels that came back with an avatar, in percent.
    pub fn coverage(&self) -> f64 {
        if self.unique_channels == 0 {
            return 0.0;
        }
        (self.avatars_found as f64 / self.unique_channels as f64) * 100.0
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    pub fn with_visibility(total_batches: usize, visible: bool) -> Self {
        let bar = if visible {
            create_progress_bar(total_batches as u64)
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    pub fn start_batch(&self, index: usize, size: usize) {
        self.bar
            .set_message(format!("batch {}: {} channels", index + 1, size));
    }

    pub fn finish_batch(&self) {
        self.bar.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => bar.set_style(style.progress_chars("█▓▒░")),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}
