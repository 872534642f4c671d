// file: src/enrich/test_support.rs
// description: in-memory channel source for exercising the fetch stages offline

use crate::enrich::ChannelSource;
use crate::error::{PipelineError, Result};
use crate::models::{ChannelItem, ChannelListResponse, ChannelSnippet, Thumbnail};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Answers from a fixed table and records every request.
#[derive(Default)]
pub(crate) struct FakeSource {
    pub(crate) thumbnails: HashMap<String, Vec<&'static str>>,
    pub(crate) fail_batches: HashSet<usize>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeSource {
    pub(crate) fn with_channels(ids: &[&str], qualities: &[&'static str]) -> Self {
        Self {
            thumbnails: ids
                .iter()
                .map(|id| (id.to_string(), qualities.to_vec()))
                .collect(),
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChannelSource for FakeSource {
    async fn list_channels(&self, ids: &[String]) -> Result<ChannelListResponse> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(ids.to_vec());
            calls.len() - 1
        };

        if self.fail_batches.contains(&call_index) {
            return Err(PipelineError::ApiStatus {
                status: 503,
                body: "backend unavailable".to_string(),
            });
        }

        let items = ids
            .iter()
            .filter_map(|id| {
                self.thumbnails.get(id).map(|qualities| ChannelItem {
                    id: id.clone(),
                    snippet: ChannelSnippet {
                        title: format!("Channel {}", id),
                        thumbnails: qualities
                            .iter()
                            .map(|q| {
                                (
                                    q.to_string(),
                                    Thumbnail {
                                        url: format!("https://yt3.ggpht.com/{}/{}.jpg", id, q),
                                    },
                                )
                            })
                            .collect(),
                    },
                })
            })
            .collect();

        Ok(ChannelListResponse { items })
    }
}
