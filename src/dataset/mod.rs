// file: src/dataset/mod.rs
// description: dataset file loading and persistence exports
// reference: internal module structure

mod loader;
mod persister;

pub use loader::load_records;
pub use persister::{save_records, to_pretty_json, write_backup};
