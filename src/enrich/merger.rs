// file: src/enrich/merger.rs
// description: writes fetched avatar urls into the matching video records

use crate::models::{ChannelAvatarMap, VideoRecord};
use tracing::info;

/// Sets `channelAvatarUrl` on each record whose channel has an avatar and
/// returns how many records were touched. Other records are left as they are.
pub fn merge_avatars(records: &mut [VideoRecord], avatars: &ChannelAvatarMap) -> usize {
    let mut enriched = 0;

    for record in records.iter_mut() {
        let Some(url) = record.channel_id().and_then(|id| avatars.get(id)).cloned() else {
            continue;
        };
        record.set_channel_avatar_url(&url);
        enriched += 1;
    }

    info!("{} entries enriched with channel avatars", enriched);
    enriched
}
