// file: src/report/mod.rs
// description: html report pipeline exports
// reference: internal module structure

mod grouper;
mod render;
mod writer;

pub use grouper::{ChannelGroup, ChannelKey, group_by_channel};
pub use render::render_html;
pub use writer::{ReportPipeline, ReportStats};
