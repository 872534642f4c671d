// file: src/enrich/dedupe.rs
// description: distinct channel id extraction

use crate::models::VideoRecord;
use std::collections::BTreeSet;
use tracing::info;

/// Collects every distinct `channelId`. Records without one are skipped.
///
/// The set is sorted so the batches built from it are reproducible between runs.
pub fn unique_channel_ids(records: &[VideoRecord]) -> BTreeSet<String> {
    let ids: BTreeSet<String> = records
        .iter()
        .filter_map(VideoRecord::channel_id)
        .map(str::to_string)
        .collect();

    info!("{} unique YouTube channels found", ids.len());
    ids
}
