// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unexpected dataset shape in {path}: {message}")]
    DatasetShape { path: PathBuf, message: String },

    #[error("YouTube API key is not configured")]
    MissingApiKey,

    #[error("No channel id found in the dataset")]
    EmptyChannelSet,

    #[error("No channel avatar could be fetched")]
    NoAvatarsFetched,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
