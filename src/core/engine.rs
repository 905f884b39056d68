use crate::core::Pipeline;
use crate::domain::model::RenderedFeed;
use crate::utils::error::Result;
use std::sync::Arc;

/// Runs one request-response cycle: fetch, filter, render. No state survives
/// a run; concurrent runs are independent.
#[derive(Clone)]
pub struct FeedEngine {
    pipeline: Arc<dyn Pipeline>,
}

impl FeedEngine {
    pub fn new(pipeline: Arc<dyn Pipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RenderedFeed> {
        let feed = self.pipeline.fetch().await?;
        let feed = self.pipeline.filter(feed);
        let rendered = self.pipeline.render(feed)?;
        tracing::debug!(
            "Rendered {} bytes as {}",
            rendered.body.len(),
            rendered.content_type
        );
        Ok(rendered)
    }
}
