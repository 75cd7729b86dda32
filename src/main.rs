//! Receipt Tracker Frontend Entry Point

mod api;
mod app;
mod browser;
mod components;
mod config;
mod context;
mod export;
mod list_state;
mod listing;
mod models;
mod upload_draft;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::resolve(browser::meta_content) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    console_logger::init(config.log_level);
    if let Some(e) = config_error {
        tracing::error!(error = %e, "invalid configuration; using defaults");
    }
    tracing::info!(
        api_base = %config.api_base,
        page_size = config.page_size.get(),
        "receipt tracker starting"
    );

    mount_to_body(move || view! { <App config=config.clone() /> });
}
