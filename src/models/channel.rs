// file: src/models/channel.rs
// description: channels.list response types and avatar selection
// reference: https://developers.google.com/youtube/v3/docs/channels/list

use serde::Deserialize;
use std::collections::HashMap;

/// channelId → avatar url, rebuilt on every enrichment run.
pub type ChannelAvatarMap = HashMap<String, String>;

/// Thumbnail keys tried in order when picking an avatar.
pub const AVATAR_QUALITY_PREFERENCE: [&str; 3] = ["high", "medium", "default"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    #[serde(default)]
    pub snippet: ChannelSnippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl ChannelItem {
    pub fn avatar_url(&self) -> Option<&str> {
        select_avatar(&self.snippet.thumbnails)
    }
}

pub fn select_avatar(thumbnails: &HashMap<String, Thumbnail>) -> Option<&str> {
    AVATAR_QUALITY_PREFERENCE
        .iter()
        .find_map(|quality| thumbnails.get(*quality))
        .map(|thumbnail| thumbnail.url.as_str())
}
