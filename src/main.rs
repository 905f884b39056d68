use clap::Parser;
use feed_sieve::server::{run_server, AppState};
use feed_sieve::utils::{logger, validation::Validate};
use feed_sieve::{CliConfig, FeedEngine, HttpFeedFetcher, ProxyPipeline, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose);

    tracing::info!("Starting feed-sieve");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match ServerConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    match config.feed_url.as_deref() {
        Some(url) => tracing::info!("Proxying upstream feed: {}", url),
        None => tracing::warn!("No feed URL configured; requests will be answered with an error"),
    }
    tracing::info!(
        "Excluding {} authors, serving {:?} output",
        config.excluded_authors.len(),
        config.output
    );

    let addr: SocketAddr = config.bind_addr.parse()?;
    let fetcher = HttpFeedFetcher::new(config.request_timeout_secs)?;
    let pipeline = ProxyPipeline::new(fetcher, config);
    let engine = FeedEngine::new(Arc::new(pipeline));

    run_server(addr, AppState::new(engine)).await
}
