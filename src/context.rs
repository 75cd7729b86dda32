//! Application Context
//!
//! Shared, read-only state provided via Leptos Context API.

use crate::api::HttpReceiptApi;
use crate::config::AppConfig;

/// App-wide configuration provided via context
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Client for the receipt service at the configured base URL
    pub fn api(&self) -> HttpReceiptApi {
        HttpReceiptApi::new(&self.config)
    }
}
