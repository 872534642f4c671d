// file: src/report/writer.rs
// description: loads the dataset, renders the channel grid and writes the html file
// reference: report pipeline entry point

use crate::config::Config;
use crate::dataset::load_records;
use crate::error::{PipelineError, Result};
use crate::report::grouper::group_by_channel;
use crate::report::render::render_html;
use crate::utils::Validator;
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const TOP_CHANNELS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportStats {
    pub channels: usize,
    pub videos: usize,
    pub output_path: PathBuf,
    pub output_bytes: u64,
    /// Up to five `(channel title, video count)` pairs, largest first.
    pub top_channels: Vec<(String, usize)>,
}

impl ReportStats {
    pub fn average_videos_per_channel(&self) -> f64 {
        if self.channels == 0 {
            return 0.0;
        }
        self.videos as f64 / self.channels as f64
    }

    pub fn output_megabytes(&self) -> f64 {
        self.output_bytes as f64 / 1024.0 / 1024.0
    }
}

pub struct ReportPipeline {
    dataset_path: PathBuf,
    output_path: PathBuf,
    title: String,
}

impl ReportPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            dataset_path: config.dataset.path.clone(),
            output_path: config.report.output_path.clone(),
            title: config.report.title.clone(),
        }
    }

    pub fn run(&self) -> Result<ReportStats> {
        Validator::validate_file_exists(&self.dataset_path)?;

        info!("Loading data...");
        let videos = load_records(&self.dataset_path)?;

        info!("Grouping videos by channel...");
        let groups = group_by_channel(&videos);
        info!("{} channels found", groups.len());

        info!("Rendering HTML...");
        let generated_at = Local::now().format("%d/%m/%Y à %H:%M:%S").to_string();
        let html = render_html(&groups, &self.title, &generated_at);

        fs::write(&self.output_path, &html).map_err(|source| PipelineError::FileOperation {
            path: self.output_path.clone(),
            source,
        })?;
        info!("Report written to {}", self.output_path.display());

        Ok(ReportStats {
            channels: groups.len(),
            videos: videos.len(),
            output_path: self.output_path.clone(),
            output_bytes: html.len() as u64,
            top_channels: groups
                .iter()
                .take(TOP_CHANNELS)
                .map(|g| (g.key.channel_title.clone(), g.len()))
                .collect(),
        })
    }
}
