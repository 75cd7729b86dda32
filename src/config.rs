//! Application Configuration
//!
//! Resolved once at startup. Each key is looked up in the host page's
//! `<meta>` tags first, then in the build environment, then falls back to a
//! built-in default.

use std::num::NonZeroUsize;
use std::str::FromStr;

use reqwest::Url;
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_API_BASE: &str = "https://upload-backend-wsmc.onrender.com";
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// `<meta name>` keys
pub const META_API_BASE: &str = "receipt-api-base";
pub const META_PAGE_SIZE: &str = "receipt-page-size";
pub const META_LOG_LEVEL: &str = "receipt-log-level";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base URL {value:?}: {reason}")]
    ApiBase { value: String, reason: String },
    #[error("invalid page size {0:?}: expected a whole number of at least 1")]
    PageSize(String),
    #[error("invalid log level {0:?}: expected error, warn, info, debug or trace")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Receipt service root; endpoint paths are joined onto it
    pub api_base: Url,
    /// Rows per page in the receipt list
    pub page_size: NonZeroUsize,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).expect("default page size is non-zero"),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Build from the page's `<meta>` lookup, then compile-time environment
    pub fn resolve(meta: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::from_layers(meta, |key| build_env(key).map(str::to_string))
    }

    /// A blank `<meta>` value defers to `fallback`
    fn from_layers(
        meta: impl Fn(&str) -> Option<String>,
        fallback: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| non_empty(meta(key)).or_else(|| fallback(key)))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(META_API_BASE)) {
            config.api_base = parse_api_base(&raw)?;
        }
        if let Some(raw) = non_empty(lookup(META_PAGE_SIZE)) {
            config.page_size = raw
                .parse::<NonZeroUsize>()
                .map_err(|_| ConfigError::PageSize(raw.clone()))?;
        }
        if let Some(raw) = non_empty(lookup(META_LOG_LEVEL)) {
            config.log_level = Level::from_str(&raw).map_err(|_| ConfigError::LogLevel(raw.clone()))?;
        }

        Ok(config)
    }

    /// `{api_base}/api/receipts`
    pub fn receipts_url(&self) -> Url {
        self.endpoint("api/receipts")
    }

    /// `{api_base}/api/upload`
    pub fn upload_url(&self) -> Url {
        self.endpoint("api/upload")
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map(|mut segments| {
                segments.pop_if_empty().extend(path.split('/'));
            })
            .ok();
        url
    }
}

fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::ApiBase {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ApiBase {
            value: raw.to_string(),
            reason: "expected an http(s) URL".to_string(),
        });
    }
    Ok(url)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        META_API_BASE => option_env!("RECEIPT_API_BASE"),
        META_PAGE_SIZE => option_env!("RECEIPT_PAGE_SIZE"),
        META_LOG_LEVEL => option_env!("RECEIPT_LOG_LEVEL"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.page_size.get(), 15);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(
            config.receipts_url().as_str(),
            "https://upload-backend-wsmc.onrender.com/api/receipts"
        );
        assert_eq!(
            config.upload_url().as_str(),
            "https://upload-backend-wsmc.onrender.com/api/upload"
        );
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (META_API_BASE, "http://localhost:3001/"),
            (META_PAGE_SIZE, "5"),
            (META_LOG_LEVEL, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.receipts_url().as_str(), "http://localhost:3001/api/receipts");
        assert_eq!(config.page_size.get(), 5);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_base_with_path_prefix() {
        let config = AppConfig::from_lookup(lookup(&[(META_API_BASE, "https://example.com/receipts")])).unwrap();
        assert_eq!(config.upload_url().as_str(), "https://example.com/receipts/api/upload");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[(META_PAGE_SIZE, "  ")])).unwrap();
        assert_eq!(config.page_size.get(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_blank_meta_defers_to_build_values() {
        let build = lookup(&[(META_API_BASE, "http://build.test/"), (META_PAGE_SIZE, "25")]);
        let config = AppConfig::from_layers(|_| Some(String::new()), build).unwrap();

        assert_eq!(config.receipts_url().as_str(), "http://build.test/api/receipts");
        assert_eq!(config.page_size.get(), 25);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_meta_wins_over_build_values() {
        let meta = lookup(&[(META_PAGE_SIZE, "5")]);
        let build = lookup(&[(META_PAGE_SIZE, "25")]);
        let config = AppConfig::from_layers(meta, build).unwrap();
        assert_eq!(config.page_size.get(), 5);
    }

    #[test]
    fn test_blank_meta_tags_resolve_like_missing_ones() {
        assert_eq!(
            AppConfig::resolve(|_| Some(String::new())),
            AppConfig::resolve(|_| None)
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(META_PAGE_SIZE, "0")])),
            Err(ConfigError::PageSize("0".to_string()))
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(META_LOG_LEVEL, "loud")])),
            Err(ConfigError::LogLevel("loud".to_string()))
        );
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(META_API_BASE, "ftp://files.example")])),
            Err(ConfigError::ApiBase { .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(META_API_BASE, "not a url")])),
            Err(ConfigError::ApiBase { .. })
        ));
    }
}
