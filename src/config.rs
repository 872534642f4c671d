// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on ids per `channels.list` call imposed by the YouTube Data API.
pub const MAX_IDS_PER_REQUEST: usize = 50;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub api: ApiConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Left empty in the config sources to get `<stem>_backup.json` next to `path`.
    #[serde(default)]
    pub backup_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub batch_size: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    pub output_path: PathBuf,
    pub title: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let mut builder = config::Config::builder()
            .set_default("dataset.path", defaults.dataset.path.display().to_string())
            .and_then(|b| b.set_default("api.base_url", defaults.api.base_url.clone()))
            .and_then(|b| b.set_default("api.batch_size", defaults.api.batch_size as u64))
            .and_then(|b| b.set_default("api.timeout_secs", defaults.api.timeout_secs))
            .and_then(|b| {
                b.set_default(
                    "report.output_path",
                    defaults.report.output_path.display().to_string(),
                )
            })
            .and_then(|b| b.set_default("report.title", defaults.report.title.clone()))
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("TUBESET")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if config.dataset.backup_path.as_os_str().is_empty() {
            config.dataset.backup_path = backup_path_for(&config.dataset.path);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            dataset: DatasetConfig {
                path: PathBuf::from("data.json"),
                backup_path: PathBuf::from("data_backup.json"),
            },
            api: ApiConfig {
                base_url: DEFAULT_API_BASE.to_string(),
                api_key: None,
                batch_size: MAX_IDS_PER_REQUEST,
                timeout_secs: 30,
            },
            report: ReportConfig {
                output_path: PathBuf::from("youtube_db_visualization.html"),
                title: "LaVideoLaPlusVue".to_string(),
            },
        }
    }

    /// Points the backup at `data_backup.json` next to a dataset given on the command line.
    pub fn with_dataset(mut self, path: PathBuf) -> Self {
        self.dataset.backup_path = backup_path_for(&path);
        self.dataset.path = path;
        self
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_batch_size(self.api.batch_size)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Validator::validate_url(&self.api.base_url)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if self.api.timeout_secs == 0 {
            return Err(PipelineError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.dataset.path == self.dataset.backup_path {
            return Err(PipelineError::Config(
                "backup_path must differ from the dataset path".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn backup_path_for(dataset: &Path) -> PathBuf {
    let stem = dataset
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "data".to_string());
    dataset.with_file_name(format!("{}_backup.json", stem))
}
