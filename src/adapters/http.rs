use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::adapters::rss::parse_feed;
use crate::domain::model::Feed;
use crate::domain::ports::FeedFetcher;
use crate::utils::error::{Result, SieveError};

const USER_AGENT: &str = concat!("feed-sieve/", env!("CARGO_PKG_VERSION"));

/// Production [`FeedFetcher`]: one GET per call, a single attempt with a
/// client-level timeout, no retries.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Feed> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SieveError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let feed = parse_feed(&bytes)?;
        tracing::debug!("Parsed {} items from upstream feed", feed.items.len());
        Ok(feed)
    }
}
