pub mod engine;
pub mod filter;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{Feed, FeedItem, OutputFormat, RenderedFeed};
pub use crate::domain::ports::{ConfigProvider, FeedFetcher, Pipeline};
pub use crate::utils::error::Result;
