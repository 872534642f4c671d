// file: src/enrich/fetcher.rs
// description: batched channel avatar lookups against the YouTube Data API
// reference: https://developers.google.com/youtube/v3/docs/channels/list

use crate::config::{ApiConfig, MAX_IDS_PER_REQUEST};
use crate::error::{PipelineError, Result};
use crate::models::{ChannelAvatarMap, ChannelListResponse};
use crate::pipeline::ProgressTracker;
use crate::utils::Validator;
use reqwest::Client;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Field selection sent with every request; only ids, titles and thumbnails are read.
pub const CHANNEL_FIELDS: &str = "items(id,snippet(title,thumbnails))";

/// Anything that can answer a `channels.list` call for up to 50 ids.
pub trait ChannelSource {
    fn list_channels(&self, ids: &[String]) -> impl Future<Output = Result<ChannelListResponse>>;
}

pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Fails with [`PipelineError::MissingApiKey`] when no usable key is configured.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = Validator::validate_api_key(config.api_key.as_deref())?.to_string();
        Validator::validate_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn channels_url(&self) -> String {
        format!("{}/channels", self.base_url)
    }
}

impl ChannelSource for YouTubeClient {
    async fn list_channels(&self, ids: &[String]) -> Result<ChannelListResponse> {
        let joined = ids.join(",");
        debug!("Requesting {} channels from {}", ids.len(), self.channels_url());

        // reqwest errors carry the request url, which includes the key
        let response = self
            .client
            .get(self.channels_url())
            .query(&[
                ("part", "snippet"),
                ("id", joined.as_str()),
                ("key", self.api_key.as_str()),
                ("fields", CHANNEL_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| PipelineError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ChannelListResponse>()
            .await
            .map_err(|e| PipelineError::Http(e.without_url()))
    }
}

/// Result of a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Resolved {
        index: usize,
        requested: Vec<String>,
        avatars: ChannelAvatarMap,
        /// Requested ids absent from the response.
        missing: Vec<String>,
        /// Returned channels with none of the preferred thumbnails.
        without_avatar: Vec<String>,
    },
    Failed {
        index: usize,
        requested: Vec<String>,
        reason: String,
    },
}

impl BatchOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Resolved { index, .. } | Self::Failed { index, .. } => *index,
        }
    }

    pub fn requested(&self) -> &[String] {
        match self {
            Self::Resolved { requested, .. } | Self::Failed { requested, .. } => requested,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl FetchReport {
    pub fn requests_sent(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed_batches(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn missing_channels(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                BatchOutcome::Resolved { missing, .. } => missing.len(),
                BatchOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Union of the avatars from every resolved batch.
    pub fn avatars(&self) -> ChannelAvatarMap {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                BatchOutcome::Resolved { avatars, .. } => Some(avatars),
                BatchOutcome::Failed { .. } => None,
            })
            .flat_map(|avatars| avatars.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect()
    }
}

pub struct BatchFetcher<S> {
    source: S,
    batch_size: usize,
    show_progress: bool,
}

impl<S: ChannelSource> BatchFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            batch_size: MAX_IDS_PER_REQUEST,
            show_progress: true,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_IDS_PER_REQUEST);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sends one request per chunk of ids, one after the other.
    ///
    /// A chunk that fails is recorded as [`BatchOutcome::Failed`] and the
    /// remaining chunks still run. Failed chunks are not retried.
    pub async fn fetch(&self, channel_ids: &[String]) -> FetchReport {
        let total_batches = channel_ids.len().div_ceil(self.batch_size);
        let progress = ProgressTracker::with_visibility(total_batches, self.show_progress);
        let mut report = FetchReport::default();

        for (index, chunk) in channel_ids.chunks(self.batch_size).enumerate() {
            progress.start_batch(index, chunk.len());
            info!("Fetching batch {}: {} channels", index + 1, chunk.len());

            let outcome = match self.source.list_channels(chunk).await {
                Ok(response) => resolve_batch(index, chunk, response),
                Err(e) => {
                    error!("API error for batch {}: {}", index + 1, e);
                    BatchOutcome::Failed {
                        index,
                        requested: chunk.to_vec(),
                        reason: e.to_string(),
                    }
                }
            };

            report.outcomes.push(outcome);
            progress.finish_batch();
        }

        progress.finish();

        let avatars = report.avatars();
        info!(
            "{} avatars fetched for {} channels",
            avatars.len(),
            channel_ids.len()
        );
        report
    }
}

fn resolve_batch(index: usize, requested: &[String], response: ChannelListResponse) -> BatchOutcome {
    let mut avatars = ChannelAvatarMap::new();
    let mut without_avatar = Vec::new();
    let mut returned = HashSet::new();

    for item in &response.items {
        returned.insert(item.id.as_str());
        match item.avatar_url() {
            Some(url) => {
                info!("  {}: {}", item.snippet.title, url);
                avatars.insert(item.id.clone(), url.to_string());
            }
            None => {
                warn!("  {}: no avatar found", item.snippet.title);
                without_avatar.push(item.id.clone());
            }
        }
    }

    let missing: Vec<String> = requested
        .iter()
        .filter(|id| !returned.contains(id.as_str()))
        .cloned()
        .collect();
    for id in &missing {
        warn!("  Channel not found: {}", id);
    }

    BatchOutcome::Resolved {
        index,
        requested: requested.to_vec(),
        avatars,
        missing,
        without_avatar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::enrich::test_support::FakeSource;
    use crate::utils::validation::API_KEY_PLACEHOLDER;
    use std::collections::BTreeSet;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("UC{:04}", i)).collect()
    }

    fn fetcher(source: FakeSource) -> BatchFetcher<FakeSource> {
        BatchFetcher::new(source).with_progress(false)
    }

    /// Serves one canned response per connection, in order, and hands back
    /// the request lines it saw.
    async fn serve(
        responses: Vec<(&'static str, &'static str)>,
    ) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/youtube/v3", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                let head = String::from_utf8_lossy(&head);
                request_lines.push(head.lines().next().unwrap_or_default().to_string());

                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            request_lines
        });

        (base_url, handle)
    }

    fn local_client(base_url: &str) -> YouTubeClient {
        let mut api = Config::default_config().api;
        api.api_key = Some("fake-key".to_string());
        api.base_url = base_url.to_string();
        api.timeout_secs = 5;
        YouTubeClient::new(&api).unwrap()
    }

    const TWO_CHANNELS: &str = r#"{"items": [
        {"id": "UC1", "snippet": {"title": "One", "thumbnails": {"high": {"url": "https://yt3.ggpht.com/one.jpg"}}}},
        {"id": "UC2", "snippet": {"title": "Two", "thumbnails": {"default": {"url": "https://yt3.ggpht.com/two.jpg"}}}}
    ]}"#;

    #[tokio::test]
    async fn test_request_count_is_ceil_of_batches() {
        for n in [1usize, 49, 50, 51, 100, 101, 237] {
            let fetcher = fetcher(FakeSource::default());
            let input = ids(n);

            let report = fetcher.fetch(&input).await;
            let calls = fetcher.source().calls();

            assert_eq!(calls.len(), n.div_ceil(50), "n = {}", n);
            assert_eq!(report.requests_sent(), calls.len());
            assert!(calls.iter().all(|c| c.len() <= 50));

            let flattened: Vec<String> = calls.into_iter().flatten().collect();
            let unique: BTreeSet<&String> = flattened.iter().collect();
            assert_eq!(flattened.len(), n);
            assert_eq!(unique.len(), n);
            assert_eq!(unique, input.iter().collect::<BTreeSet<_>>());
        }
    }

    #[tokio::test]
    async fn test_no_ids_no_requests() {
        let fetcher = fetcher(FakeSource::default());
        let report = fetcher.fetch(&[]).await;
        assert_eq!(report.requests_sent(), 0);
        assert!(fetcher.source().calls().is_empty());
    }

    #[tokio::test]
    async fn test_smaller_batch_size() {
        let fetcher = fetcher(FakeSource::default()).with_batch_size(10);
        fetcher.fetch(&ids(25)).await;
        let sizes: Vec<usize> = fetcher.source().calls().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[tokio::test]
    async fn test_thumbnail_preference() {
        let source = FakeSource::with_channels(&["UCmed"], &["default", "medium"]);
        let report = fetcher(source).fetch(&["UCmed".to_string()]).await;

        assert_eq!(
            report.avatars().get("UCmed").map(String::as_str),
            Some("https://yt3.ggpht.com/UCmed/medium.jpg")
        );
    }

    #[tokio::test]
    async fn test_missing_and_avatarless_channels_are_reported() {
        let mut source = FakeSource::with_channels(&["UCok"], &["high"]);
        source.thumbnails.insert("UCbare".to_string(), vec!["maxres"]);

        let requested: Vec<String> = ["UCok", "UCbare", "UCgone"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = fetcher(source).fetch(&requested).await;

        match &report.outcomes[0] {
            BatchOutcome::Resolved {
                avatars,
                missing,
                without_avatar,
                ..
            } => {
                assert_eq!(avatars.len(), 1);
                assert_eq!(missing, &vec!["UCgone".to_string()]);
                assert_eq!(without_avatar, &vec!["UCbare".to_string()]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(report.missing_channels(), 1);
        assert!(!report.avatars().contains_key("UCbare"));
    }

    #[tokio::test]
    async fn test_failed_batch_keeps_other_results() {
        let input = ids(120);
        let names: Vec<&str> = input.iter().map(String::as_str).collect();
        let mut source = FakeSource::with_channels(&names, &["high"]);
        source.fail_batches.insert(1);

        let fetcher = fetcher(source);
        let report = fetcher.fetch(&input).await;

        assert_eq!(report.requests_sent(), 3);
        assert_eq!(report.failed_batches(), 1);
        assert!(report.outcomes[1].is_failed());
        assert_eq!(report.outcomes[1].index(), 1);
        assert_eq!(report.outcomes[1].requested().len(), 50);
        if let BatchOutcome::Failed { reason, .. } = &report.outcomes[1] {
            assert!(reason.contains("503"));
        }

        let avatars = report.avatars();
        assert_eq!(avatars.len(), 70);
        assert!(avatars.contains_key("UC0000"));
        assert!(!avatars.contains_key("UC0050"));
        assert!(avatars.contains_key("UC0119"));
    }

    #[test]
    fn test_client_requires_real_key() {
        let mut api = Config::default_config().api;
        assert!(matches!(
            YouTubeClient::new(&api),
            Err(PipelineError::MissingApiKey)
        ));

        api.api_key = Some(API_KEY_PLACEHOLDER.to_string());
        assert!(matches!(
            YouTubeClient::new(&api),
            Err(PipelineError::MissingApiKey)
        ));
    }

    #[test]
    fn test_client_channels_url() {
        let mut api = Config::default_config().api;
        api.api_key = Some("fake-key".to_string());
        api.base_url = "http://127.0.0.1:9/youtube/v3/".to_string();

        let client = YouTubeClient::new(&api).unwrap();
        assert_eq!(client.channels_url(), "http://127.0.0.1:9/youtube/v3/channels");
    }

    #[tokio::test]
    async fn test_client_sends_channels_list_query() {
        let (base_url, server) = serve(vec![("200 OK", TWO_CHANNELS)]).await;
        let client = local_client(&base_url);

        let response = client
            .list_channels(&["UC1".to_string(), "UC2".to_string()])
            .await
            .unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].avatar_url(), Some("https://yt3.ggpht.com/one.jpg"));
        assert_eq!(response.items[1].avatar_url(), Some("https://yt3.ggpht.com/two.jpg"));

        let request_lines = server.await.unwrap();
        let mut parts = request_lines[0].split_whitespace();
        assert_eq!(parts.next(), Some("GET"));
        let target = parts.next().unwrap();
        let url = reqwest::Url::parse(&format!("http://localhost{}", target)).unwrap();
        assert_eq!(url.path(), "/youtube/v3/channels");

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("part".to_string(), "snippet".to_string()),
                ("id".to_string(), "UC1,UC2".to_string()),
                ("key".to_string(), "fake-key".to_string()),
                ("fields".to_string(), CHANNEL_FIELDS.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_client_maps_error_status() {
        let body = r#"{"error": {"code": 403, "message": "quotaExceeded"}}"#;
        let (base_url, server) = serve(vec![("403 Forbidden", body)]).await;
        let client = local_client(&base_url);

        let result = client.list_channels(&["UC1".to_string()]).await;
        match result {
            Err(PipelineError::ApiStatus { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("quotaExceeded"));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.items.len())),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_fails_only_its_batch() {
        let second = r#"{"items": [{"id": "UC2", "snippet": {"title": "Two", "thumbnails": {"medium": {"url": "https://yt3.ggpht.com/two.jpg"}}}}]}"#;
        let (base_url, server) =
            serve(vec![("200 OK", "{\"items\": [not json"), ("200 OK", second)]).await;

        let fetcher = BatchFetcher::new(local_client(&base_url))
            .with_batch_size(1)
            .with_progress(false);
        let report = fetcher
            .fetch(&["UC1".to_string(), "UC2".to_string()])
            .await;

        assert_eq!(report.requests_sent(), 2);
        assert_eq!(report.failed_batches(), 1);
        assert!(report.outcomes[0].is_failed());
        assert!(!report.outcomes[1].is_failed());

        let avatars = report.avatars();
        assert_eq!(avatars.len(), 1);
        assert_eq!(
            avatars.get("UC2").map(String::as_str),
            Some("https://yt3.ggpht.com/two.jpg")
        );
        assert_eq!(server.await.unwrap().len(), 2);
    }

    #[test]
    fn test_unreachable_api_is_an_error() {
        let mut api = Config::default_config().api;
        api.api_key = Some("fake-key".to_string());
        api.base_url = "http://127.0.0.1:9".to_string();
        api.timeout_secs = 2;

        let client = YouTubeClient::new(&api).unwrap();
        let result = tokio_test::block_on(client.list_channels(&["UC1".to_string()]));
        assert!(matches!(result, Err(PipelineError::Http(_))));
    }
}
