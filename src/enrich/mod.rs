// file: src/enrich/mod.rs
// description: channel avatar enrichment stages
// reference: internal module structure

mod dedupe;
mod fetcher;
mod merger;

pub use dedupe::unique_channel_ids;
pub use fetcher::{
    BatchFetcher, BatchOutcome, CHANNEL_FIELDS, ChannelSource, FetchReport, YouTubeClient,
};
pub use merger::merge_avatars;

#[cfg(test)]
pub(crate) mod test_support;
