use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Optional TOML configuration file. Every key is optional; present keys sit
/// below environment variables and CLI flags in precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub feed_url: Option<String>,
    pub excluded_authors: Option<Vec<String>>,
    pub output: Option<OutputFormat>,
    pub bind_addr: Option<String>,
    pub language: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}
