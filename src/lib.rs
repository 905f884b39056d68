pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::http::HttpFeedFetcher;
pub use config::{CliConfig, ServerConfig};
pub use core::engine::FeedEngine;
pub use core::pipeline::ProxyPipeline;
pub use utils::error::{Result, SieveError};
