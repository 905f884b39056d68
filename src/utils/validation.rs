use crate::utils::error::{Result, SieveError};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SieveError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SieveError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SieveError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_bind_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| SieveError::InvalidConfigValue {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SieveError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SieveError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("feed_url", "https://example.com/rss").is_ok());
        assert!(validate_url("feed_url", "http://example.com").is_ok());
        assert!(validate_url("feed_url", "").is_err());
        assert!(validate_url("feed_url", "not-a-url").is_err());
        assert!(validate_url("feed_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_bind_addr() {
        assert!(validate_bind_addr("bind_addr", "127.0.0.1:8080").is_ok());
        assert!(validate_bind_addr("bind_addr", "0.0.0.0:80").is_ok());
        assert!(validate_bind_addr("bind_addr", "localhost:8080").is_err());
        assert!(validate_bind_addr("bind_addr", "8080").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("request_timeout_secs", 30, 1).is_ok());
        assert!(validate_positive_number("request_timeout_secs", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("language", "ja").is_ok());
        assert!(validate_non_empty_string("language", "   ").is_err());
    }
}
