// file: src/pipeline/orchestrator.rs
// description: coordinates dataset loading, avatar fetching, merging and saving
// reference: orchestrates the sequential enrichment workflow

use crate::config::{Config, DatasetConfig};
use crate::dataset::{load_records, save_records, write_backup};
use crate::enrich::{BatchFetcher, ChannelSource, FetchReport, merge_avatars, unique_channel_ids};
use crate::error::{PipelineError, Result};
use crate::pipeline::progress::EnrichmentStats;
use crate::utils::logging::format_step;
use std::time::Instant;
use tracing::{error, info, warn};

const TOTAL_STEPS: usize = 6;

pub struct EnrichmentPipeline<S> {
    dataset: DatasetConfig,
    fetcher: BatchFetcher<S>,
}

impl<S: ChannelSource> EnrichmentPipeline<S> {
    pub fn new(config: &Config, source: S) -> Self {
        let fetcher = BatchFetcher::new(source).with_batch_size(config.api.batch_size);

        Self {
            dataset: config.dataset.clone(),
            fetcher,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.fetcher = self.fetcher.with_progress(show_progress);
        self
    }

    pub fn fetcher(&self) -> &BatchFetcher<S> {
        &self.fetcher
    }

    /// Runs every stage in order and stops at the first fatal error.
    ///
    /// The backup is written before any record is touched. When no avatar at
    /// all could be fetched the dataset file is left as it was.
    pub async fn run(&self) -> Result<EnrichmentStats> {
        let start_time = Instant::now();
        info!("Starting YouTube channel avatar enrichment");

        info!("{}", format_step(1, TOTAL_STEPS, "Loading dataset"));
        let mut records = load_records(&self.dataset.path)?;

        info!("{}", format_step(2, TOTAL_STEPS, "Writing backup"));
        write_backup(&records, &self.dataset.backup_path)?;

        info!("{}", format_step(3, TOTAL_STEPS, "Extracting channel ids"));
        let channel_ids: Vec<String> = unique_channel_ids(&records).into_iter().collect();
        if channel_ids.is_empty() {
            error!("No channel id found in {}", self.dataset.path.display());
            return Err(PipelineError::EmptyChannelSet);
        }

        info!("{}", format_step(4, TOTAL_STEPS, "Fetching avatars from the YouTube API"));
        let report = self.fetcher.fetch(&channel_ids).await;
        self.log_fetch_report(&report);

        let avatars = report.avatars();
        if avatars.is_empty() {
            error!("No avatar fetched, {} left unchanged", self.dataset.path.display());
            return Err(PipelineError::NoAvatarsFetched);
        }

        info!("{}", format_step(5, TOTAL_STEPS, "Merging avatars into records"));
        let records_enriched = merge_avatars(&mut records, &avatars);

        info!("{}", format_step(6, TOTAL_STEPS, "Saving enriched dataset"));
        save_records(&records, &self.dataset.path)?;

        Ok(EnrichmentStats {
            total_records: records.len(),
            unique_channels: channel_ids.len(),
            avatars_found: avatars.len(),
            records_enriched,
            batches_sent: report.requests_sent(),
            batches_failed: report.failed_batches(),
            channels_not_found: report.missing_channels(),
            dataset_path: self.dataset.path.clone(),
            backup_path: self.dataset.backup_path.clone(),
            duration: start_time.elapsed(),
        })
    }

    fn log_fetch_report(&self, report: &FetchReport) {
        let failed = report.failed_batches();
        if failed > 0 {
            warn!(
                "{} of {} batches failed and were skipped",
                failed,
                report.requests_sent()
            );
        }

        let missing = report.missing_channels();
        if missing > 0 {
            warn!("{} channels were not returned by the API", missing);
        }
    }
}
