// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::{ApiConfig, Config, DatasetConfig, ReportConfig};
pub use enrich::{BatchFetcher, BatchOutcome, ChannelSource, FetchReport, YouTubeClient};
pub use error::{PipelineError, Result};
pub use models::{ChannelAvatarMap, VideoRecord};
pub use pipeline::{EnrichmentPipeline, EnrichmentStats, ProgressTracker};
pub use report::{ChannelGroup, ReportPipeline, ReportStats};
pub use utils::Validator;
