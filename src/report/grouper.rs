// file: src/report/grouper.rs
// description: clusters video records by originating channel

use crate::models::VideoRecord;
use std::collections::HashMap;

/// Identity of a channel as seen in the dataset.
///
/// The avatar is part of the key, so a channel whose records disagree on
/// `channelAvatarUrl` shows up as several groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    pub channel_id: String,
    pub channel_title: String,
    pub avatar_url: String,
}

impl ChannelKey {
    pub fn of(record: &VideoRecord) -> Self {
        Self {
            channel_id: record.channel_id().unwrap_or_default().to_string(),
            channel_title: record.channel_title().unwrap_or_default().to_string(),
            avatar_url: record.channel_avatar_url().unwrap_or_default().to_string(),
        }
    }

    pub fn avatar(&self) -> Option<&str> {
        Some(self.avatar_url.as_str()).filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct ChannelGroup<'a> {
    pub key: ChannelKey,
    pub videos: Vec<&'a VideoRecord>,
}

impl ChannelGroup<'_> {
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// One group per distinct [`ChannelKey`], largest first.
///
/// Groups of equal size stay in the order their first record appears.
pub fn group_by_channel(records: &[VideoRecord]) -> Vec<ChannelGroup<'_>> {
    let mut positions: HashMap<ChannelKey, usize> = HashMap::new();
    let mut groups: Vec<ChannelGroup<'_>> = Vec::new();

    for record in records {
        let key = ChannelKey::of(record);
        match positions.get(&key) {
            Some(&pos) => groups[pos].videos.push(record),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(ChannelGroup {
                    key,
                    videos: vec![record],
                });
            }
        }
    }

    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups
}
