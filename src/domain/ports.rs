use crate::domain::model::{Feed, OutputFormat, RenderedFeed};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Upstream collaborator: turns a URL into a parsed [`Feed`] or a descriptive
/// error. Injected so tests can supply a fake feed without network access.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Feed>;
}

pub trait ConfigProvider: Send + Sync {
    fn feed_url(&self) -> Option<&str>;
    fn excluded_authors(&self) -> &[String];
    fn output_format(&self) -> OutputFormat;
    fn language(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<Feed>;
    fn filter(&self, feed: Feed) -> Feed;
    fn render(&self, feed: Feed) -> Result<RenderedFeed>;
}
