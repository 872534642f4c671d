// file: src/dataset/loader.rs
// description: whole-file loading of the video dataset
// reference: https://docs.rs/serde_json

use crate::error::{PipelineError, Result};
use crate::models::VideoRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Reads the complete dataset; it must be a JSON array of objects.
pub fn load_records(path: &Path) -> Result<Vec<VideoRecord>> {
    let content = fs::read_to_string(path).map_err(|source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value =
        serde_json::from_str(&content).map_err(|source| PipelineError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let Value::Array(items) = document else {
        return Err(PipelineError::DatasetShape {
            path: path.to_path_buf(),
            message: "top-level value must be an array".to_string(),
        });
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(VideoRecord::from_map(fields)),
            other => Err(PipelineError::DatasetShape {
                path: path.to_path_buf(),
                message: format!("entry {} is {} instead of an object", index, kind(&other)),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} bytes from {}", content.len(), path.display());
    info!("Loaded {}: {} entries", path.display(), records.len());
    Ok(records)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
