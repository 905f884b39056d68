pub mod file;

use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{Result, SieveError};
use crate::utils::validation::{
    validate_bind_addr, validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use std::env;
use std::path::PathBuf;

use file::FileConfig;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_LANGUAGE: &str = "ja";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "feed-sieve")]
#[command(about = "Filtering RSS proxy: fetch one feed, drop excluded authors, re-serve it")]
pub struct CliConfig {
    /// Upstream feed URL (falls back to FEED_URL)
    #[arg(long)]
    pub feed_url: Option<String>,

    /// Comma-separated authors to exclude (falls back to EXCLUDED_AUTHORS)
    #[arg(long, value_delimiter = ',')]
    pub excluded_authors: Option<Vec<String>>,

    /// Format served by the endpoint (falls back to OUTPUT_FORMAT)
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Listen address (falls back to BIND_ADDR)
    #[arg(long)]
    pub bind_addr: Option<String>,

    /// RSS channel language (falls back to FEED_LANGUAGE)
    #[arg(long)]
    pub language: Option<String>,

    /// Upstream request timeout in seconds (falls back to REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

/// Resolved configuration the server actually runs with.
///
/// `feed_url` stays optional past startup: a request made while it is unset
/// is answered with a configuration error instead of failing the process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub feed_url: Option<String>,
    pub excluded_authors: Vec<String>,
    pub output: OutputFormat,
    pub bind_addr: String,
    pub language: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            excluded_authors: Vec::new(),
            output: OutputFormat::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Merge the layers with precedence CLI > environment > file > defaults.
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve_with(cli, &file, |key| env::var(key).ok())
    }

    pub fn resolve_with(
        cli: &CliConfig,
        file: &FileConfig,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let lookup = |key: &str| env_lookup(key).filter(|v| !v.trim().is_empty());

        let feed_url = cli
            .feed_url
            .clone()
            .or_else(|| lookup("FEED_URL"))
            .or_else(|| file.feed_url.clone());

        let excluded_authors = cli
            .excluded_authors
            .clone()
            .or_else(|| lookup("EXCLUDED_AUTHORS").map(|raw| parse_author_list(&raw)))
            .or_else(|| file.excluded_authors.clone())
            .unwrap_or_default();

        let output = match (cli.output, lookup("OUTPUT_FORMAT"), file.output) {
            (Some(output), _, _) => output,
            (None, Some(raw), _) => {
                raw.parse()
                    .map_err(|reason| SieveError::InvalidConfigValue {
                        field: "OUTPUT_FORMAT".to_string(),
                        value: raw.clone(),
                        reason,
                    })?
            }
            (None, None, Some(output)) => output,
            (None, None, None) => OutputFormat::default(),
        };

        let request_timeout_secs = match (cli.request_timeout_secs, lookup("REQUEST_TIMEOUT_SECS")) {
            (Some(secs), _) => secs,
            (None, Some(raw)) => {
                raw.parse()
                    .map_err(|e| SieveError::InvalidConfigValue {
                        field: "REQUEST_TIMEOUT_SECS".to_string(),
                        value: raw.clone(),
                        reason: format!("not a number: {}", e),
                    })?
            }
            (None, None) => file
                .request_timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            feed_url,
            excluded_authors,
            output,
            bind_addr: cli
                .bind_addr
                .clone()
                .or_else(|| lookup("BIND_ADDR"))
                .or_else(|| file.bind_addr.clone())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            language: cli
                .language
                .clone()
                .or_else(|| lookup("FEED_LANGUAGE"))
                .or_else(|| file.language.clone())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            request_timeout_secs,
        })
    }
}

/// Split a comma-separated author list; entries are trimmed and empties
/// dropped. Lowercasing happens when the ExclusionSet is built.
pub fn parse_author_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl ConfigProvider for ServerConfig {
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

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        // Absent feed_url is allowed here; requests report it as their own
        // error without touching the network.
        if let Some(url) = &self.feed_url {
            validate_url("feed_url", url)?;
        }
        validate_bind_addr("bind_addr", &self.bind_addr)?;
        validate_non_empty_string("language", &self.language)?;
        validate_positive_number("request_timeout_secs", self.request_timeout_secs, 1)?;
        Ok(())
    }
}
