// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod channel;
pub mod video;

pub use channel::{
    ChannelAvatarMap, ChannelItem, ChannelListResponse, ChannelSnippet, Thumbnail, select_avatar,
};
pub use video::VideoRecord;
