use serde::{Deserialize, Serialize};

/// One entry of an upstream feed. Every field is optional because real-world
/// RSS omits any of them freely; `pub_date` keeps the verbatim source string
/// and is never reparsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub author: Option<String>,
    pub pub_date: Option<String>,
    pub description: Option<String>,
}

/// Parsed upstream feed. Produced fresh on every request, never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feed {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub items: Vec<FeedItem>,
}

/// Final response body plus the content type it must be served with.
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub content_type: &'static str,
    pub body: String,
}

/// Which renderer a deployment serves. One route, one format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Rss,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "rss" | "xml" => Ok(Self::Rss),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}
