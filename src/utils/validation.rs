// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::config::MAX_IDS_PER_REQUEST;
use crate::error::{PipelineError, Result};
use std::path::Path;

/// Value shipped in the original setup instructions before a real key is filled in.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_YOUTUBE_API_KEY_HERE";

pub struct Validator;

impl Validator {
    pub fn validate_api_key(key: Option<&str>) -> Result<&str> {
        match key.map(str::trim) {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
            _ => Err(PipelineError::MissingApiKey),
        }
    }

    pub fn validate_file_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_batch_size(size: usize) -> Result<()> {
        if size == 0 {
            return Err(PipelineError::Validation(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        if size > MAX_IDS_PER_REQUEST {
            return Err(PipelineError::Validation(format!(
                "Batch size too large (max {})",
                MAX_IDS_PER_REQUEST
            )));
        }

        Ok(())
    }
}
