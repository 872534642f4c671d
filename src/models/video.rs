// file: src/models/video.rs
// description: video record model backed by the raw json object
// reference: internal data structures

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIELD_ID: &str = "id";
pub const FIELD_CHANNEL_ID: &str = "channelId";
pub const FIELD_CHANNEL_TITLE: &str = "channelTitle";
pub const FIELD_VIEW_COUNT: &str = "viewCount";
pub const FIELD_THUMBNAIL_URL: &str = "thumbnailUrl";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_CHANNEL_AVATAR_URL: &str = "channelAvatarUrl";

/// One entry of the dataset.
///
/// The object is kept as parsed (key order included) so fields this crate does
/// not know about survive a load/save cycle untouched. Typed accessors cover
/// the fields the pipelines read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoRecord(Map<String, Value>);

impl VideoRecord {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field(FIELD_ID)
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.str_field(FIELD_CHANNEL_ID)
    }

    pub fn channel_title(&self) -> Option<&str> {
        self.str_field(FIELD_CHANNEL_TITLE)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field(FIELD_TITLE)
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.str_field(FIELD_THUMBNAIL_URL)
            .filter(|url| !url.is_empty())
    }

    pub fn channel_avatar_url(&self) -> Option<&str> {
        self.str_field(FIELD_CHANNEL_AVATAR_URL)
            .filter(|url| !url.is_empty())
    }

    /// Missing or unreadable counts read as 0. Numeric strings are accepted
    /// since the Data API reports statistics as strings.
    pub fn view_count(&self) -> u64 {
        match self.0.get(FIELD_VIEW_COUNT) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn set_channel_avatar_url(&mut self, url: &str) {
        self.0.insert(
            FIELD_CHANNEL_AVATAR_URL.to_string(),
            Value::String(url.to_string()),
        );
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}
