//! HTTP Client
//!
//! [`ReceiptApi`] over `reqwest`; in the browser this rides on `fetch`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult, PartValue, ReceiptApi, UploadRequest};
use crate::config::AppConfig;
use crate::models::Receipt;

#[derive(Debug, Clone)]
pub struct HttpReceiptApi {
    receipts_url: Url,
    upload_url: Url,
    http: Client,
}

impl HttpReceiptApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            receipts_url: config.receipts_url(),
            upload_url: config.upload_url(),
            http: Client::new(),
        }
    }
}

#[async_trait(?Send)]
impl ReceiptApi for HttpReceiptApi {
    async fn list_receipts(&self) -> ApiResult<Vec<Receipt>> {
        let url = &self.receipts_url;
        tracing::debug!(%url, "fetching receipts");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;
        decode(url, response).await
    }

    async fn upload_receipt(&self, request: &UploadRequest) -> ApiResult<Receipt> {
        let url = &self.upload_url;
        tracing::debug!(%url, image = request.image.kind(), "uploading receipt");

        let response = self
            .http
            .post(url.clone())
            .multipart(build_form(request)?)
            .send()
            .await
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;
        decode(url, response).await
    }
}

fn build_form(request: &UploadRequest) -> ApiResult<Form> {
    request.parts().into_iter().try_fold(Form::new(), |form, part| {
        Ok(match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let mut file = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = content_type {
                    file = file.mime_str(&mime).map_err(|e| ApiError::Multipart {
                        field: part.name,
                        reason: e.to_string(),
                    })?;
                }
                form.part(part.name, file)
            }
        })
    })
}

/// Non-2xx is an error; the body is read as text so decode failures keep
/// serde's message.
async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.clone(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| ApiError::Transport { url: url.clone(), source })?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { url: url.clone(), source })
}
