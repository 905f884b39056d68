use crate::core::filter::{filter_feed, ExclusionSet};
use crate::core::render;
use crate::core::{ConfigProvider, Feed, FeedFetcher, OutputFormat, Pipeline, RenderedFeed};
use crate::utils::error::{Result, SieveError};
use async_trait::async_trait;
use chrono::Utc;

/// Fixed message for requests made while no upstream URL is configured.
pub const MISSING_FEED_URL: &str = "feed URL is not configured; set FEED_URL or --feed-url";

pub struct ProxyPipeline<F: FeedFetcher, C: ConfigProvider> {
    fetcher: F,
    config: C,
}

impl<F: FeedFetcher, C: ConfigProvider> ProxyPipeline<F, C> {
    pub fn new(fetcher: F, config: C) -> Self {
        Self { fetcher, config }
    }
}

#[async_trait]
impl<F: FeedFetcher, C: ConfigProvider> Pipeline for ProxyPipeline<F, C> {
    async fn fetch(&self) -> Result<Feed> {
        let url = self
            .config
            .feed_url()
            .ok_or_else(|| SieveError::config(MISSING_FEED_URL))?;

        tracing::debug!("Fetching upstream feed from: {}", url);
        let feed = self.fetcher.fetch(url).await?;
        tracing::debug!("Fetched {} items", feed.items.len());
        Ok(feed)
    }

    fn filter(&self, feed: Feed) -> Feed {
        let excluded = ExclusionSet::new(self.config.excluded_authors());
        let before = feed.items.len();
        let feed = filter_feed(feed, &excluded);
        tracing::debug!("Suppressed {} of {} items", before - feed.items.len(), before);
        feed
    }

    fn render(&self, feed: Feed) -> Result<RenderedFeed> {
        match self.config.output_format() {
            OutputFormat::Json => render::render_json(&feed),
            OutputFormat::Rss => Ok(render::render_rss(&feed, self.config.language(), Utc::now())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::FeedEngine;
    use crate::domain::model::FeedItem;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockFetcher {
        feed: Feed,
        calls: Arc<AtomicUsize>,
    }

    impl MockFetcher {
        fn new(feed: Feed) -> Self {
            Self {
                feed,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl FeedFetcher for MockFetcher {
        async fn fetch(&self, _url: &str) -> Result<Feed> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.feed.clone())
        }
    }

    struct MockConfig {
        feed_url: Option<String>,
        excluded_authors: Vec<String>,
        output: OutputFormat,
        language: String,
    }

    impl MockConfig {
        fn new(feed_url: Option<&str>) -> Self {
            Self {
                feed_url: feed_url.map(str::to_string),
                excluded_authors: vec![],
                output: OutputFormat::Json,
                language: "ja".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn feed_url(&self) -> Option<&str> {
            self.feed_url.as_deref()
        }

        fn excluded_authors(&self) -> &[String] {
            &self.excluded_authors
        }

        fn output_format(&self) -> OutputFormat {
            self.output
        }

        fn language(&self) -> &str {
            &self.language
        }
    }

    fn feed_with_authors(authors: &[&str]) -> Feed {
        Feed {
            title: Some("feed".to_string()),
            link: Some("https://example.com".to_string()),
            description: None,
            items: authors
                .iter()
                .map(|a| FeedItem {
                    title: Some(format!("post by {}", a)),
                    link: Some(format!("https://example.com/{}", a)),
                    author: Some(a.to_string()),
                    pub_date: None,
                    description: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_fetch_without_feed_url_never_hits_fetcher() {
        let fetcher = MockFetcher::new(feed_with_authors(&["alice"]));
        let calls = fetcher.calls.clone();
        let pipeline = ProxyPipeline::new(fetcher, MockConfig::new(None));

        let err = pipeline.fetch().await.unwrap_err();
        assert!(matches!(err, SieveError::Config { .. }));
        assert!(err.to_string().contains("feed URL is not configured"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_filter_applies_exclusions_in_order() {
        let pipeline = ProxyPipeline::new(
            MockFetcher::new(feed_with_authors(&["alice", "bob", "carol"])),
            MockConfig {
                excluded_authors: vec!["Bob".to_string()],
                ..MockConfig::new(Some("https://example.com/rss"))
            },
        );

        let feed = pipeline.fetch().await.unwrap();
        let filtered = pipeline.filter(feed);

        let authors: Vec<_> = filtered
            .items
            .iter()
            .map(|i| i.author.as_deref().unwrap())
            .collect();
        assert_eq!(authors, vec!["alice", "carol"]);
    }

    #[tokio::test]
    async fn test_render_dispatches_on_output_format() {
        let json_pipeline = ProxyPipeline::new(
            MockFetcher::new(feed_with_authors(&["alice"])),
            MockConfig::new(Some("https://example.com/rss")),
        );
        let rendered = json_pipeline
            .render(feed_with_authors(&["alice"]))
            .unwrap();
        assert_eq!(rendered.content_type, "application/json");

        let rss_pipeline = ProxyPipeline::new(
            MockFetcher::new(feed_with_authors(&["alice"])),
            MockConfig {
                output: OutputFormat::Rss,
                ..MockConfig::new(Some("https://example.com/rss"))
            },
        );
        let rendered = rss_pipeline.render(feed_with_authors(&["alice"])).unwrap();
        assert_eq!(rendered.content_type, "application/rss+xml");
        assert!(rendered.body.contains("<rss version=\"2.0\""));
    }

    #[tokio::test]
    async fn test_engine_runs_all_stages() {
        let pipeline = ProxyPipeline::new(
            MockFetcher::new(feed_with_authors(&["alice", "bob"])),
            MockConfig {
                excluded_authors: vec!["bob".to_string()],
                ..MockConfig::new(Some("https://example.com/rss"))
            },
        );
        let engine = FeedEngine::new(Arc::new(pipeline));

        let rendered = engine.run().await.unwrap();
        assert!(rendered.body.contains("alice"));
        assert!(!rendered.body.contains("bob"));
    }
}
