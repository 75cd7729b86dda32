//! Receipt Service API
//!
//! Bindings to the remote receipt service, organized by operation.
//! Views talk to [`ReceiptApi`] so the upload and list flows can run against
//! an in-memory service in tests.

mod client;
mod upload;

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;

use crate::models::Receipt;

pub use client::HttpReceiptApi;
pub use upload::*;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: Url, status: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid multipart field {field}: {reason}")]
    Multipart { field: &'static str, reason: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations offered by the receipt service
#[async_trait(?Send)]
pub trait ReceiptApi {
    /// `GET /api/receipts`
    async fn list_receipts(&self) -> ApiResult<Vec<Receipt>>;

    /// `POST /api/upload`; returns the stored record
    async fn upload_receipt(&self, request: &UploadRequest) -> ApiResult<Receipt>;
}
