// file: src/dataset/persister.rs
// description: pretty-printed json writes for the dataset and its backup
// reference: https://docs.rs/tempfile/latest/tempfile/struct.NamedTempFile.html#method.persist

use crate::error::{PipelineError, Result};
use crate::models::VideoRecord;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Serializes with two-space indentation; non-ASCII text is written as-is.
pub fn to_pretty_json(records: &[VideoRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| PipelineError::Serialization(e.to_string()))
}

/// Copies the untouched collection to `path`, replacing any previous backup.
pub fn write_backup(records: &[VideoRecord], path: &Path) -> Result<()> {
    let json = to_pretty_json(records)?;
    fs::write(path, json).map_err(|source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Backup written to {}: {} entries", path.display(), records.len());
    Ok(())
}

/// Replaces the dataset at `path` in one step.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target, so an interrupted run leaves either the old or
/// the new file in place.
pub fn save_records(records: &[VideoRecord], path: &Path) -> Result<()> {
    let json = to_pretty_json(records)?;
    let file_error = |source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(file_error)?;
    staged.write_all(json.as_bytes()).map_err(file_error)?;
    staged.as_file().sync_all().map_err(file_error)?;

    // the staged file is created 0600; keep the mode of the file being replaced
    if let Ok(existing) = fs::metadata(path) {
        fs::set_permissions(staged.path(), existing.permissions()).map_err(file_error)?;
    }
    staged.persist(path).map_err(|e| file_error(e.error))?;

    info!("Saved {}: {} entries", path.display(), records.len());
    Ok(())
}
