//! Upload Draft
//!
//! The upload form's in-progress receipt, its validation, and the single
//! submit attempt.

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::{ApiError, CapturedImage, ReceiptApi, ReceiptImage, SelectedFile, UploadRequest};
use crate::models::{parse_price, Person, Purpose, Receipt};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file or capture an image.")]
    MissingImage,
    #[error("Price must be a number, e.g. 12.50.")]
    InvalidPrice,
    #[error("Date must be a valid date (YYYY-MM-DD).")]
    InvalidDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadDraft {
    pub image: Option<ReceiptImage>,
    pub description: String,
    pub store: String,
    /// As typed
    pub price: String,
    /// `YYYY-MM-DD` from the date input
    pub date: String,
    pub purpose: Purpose,
    pub person: Person,
    /// Bumped on every image change; survives `reset`
    selection: u64,
}

/// Identifies one file pick while its bytes are being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket(u64);

impl UploadDraft {
    /// Use a picked file; drops any captured image
    pub fn select_file(&mut self, file: SelectedFile) {
        self.selection += 1;
        self.image = Some(ReceiptImage::File(file));
    }

    /// Use a camera still; drops any picked file
    pub fn set_captured(&mut self, image: CapturedImage) {
        self.selection += 1;
        self.image = Some(ReceiptImage::Captured(image));
    }

    /// The file input changed. The previous image no longer matches it, so
    /// it is dropped until the new file has been read.
    pub fn begin_file_selection(&mut self) -> SelectionTicket {
        self.selection += 1;
        self.image = None;
        SelectionTicket(self.selection)
    }

    /// Apply a file read for `ticket`. Returns `false` and leaves the draft
    /// alone when the image changed after the read began.
    pub fn finish_file_selection(&mut self, ticket: SelectionTicket, file: SelectedFile) -> bool {
        if ticket != SelectionTicket(self.selection) {
            return false;
        }
        self.select_file(file);
        true
    }

    pub fn captured_preview(&self) -> Option<&str> {
        match &self.image {
            Some(ReceiptImage::Captured(image)) => Some(image.data_url()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<UploadRequest, ValidationError> {
        let image = self.image.clone().ok_or(ValidationError::MissingImage)?;
        let price = parse_price(&self.price).map_err(|_| ValidationError::InvalidPrice)?;
        let date = match self.date.trim() {
            "" => None,
            raw => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?),
        };

        Ok(UploadRequest {
            image,
            description: self.description.trim().to_string(),
            store: self.store.trim().to_string(),
            price,
            date,
            purpose: self.purpose.clone(),
            person: self.person.clone(),
        })
    }

    /// Back to an empty form with default tags
    pub fn reset(&mut self) {
        *self = Self {
            selection: self.selection + 1,
            ..Self::default()
        };
    }
}

/// Message line under the upload form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
    Invalid(ValidationError),
}

impl UploadStatus {
    pub fn message(&self) -> String {
        match self {
            UploadStatus::Idle => String::new(),
            UploadStatus::Uploading => "Uploading...".to_string(),
            UploadStatus::Succeeded => "Upload successful!".to_string(),
            UploadStatus::Failed => "Failed to upload receipt. Please try again.".to_string(),
            UploadStatus::Invalid(e) => e.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UploadStatus::Failed | UploadStatus::Invalid(_))
    }
}

#[derive(Debug)]
pub enum UploadOutcome {
    /// Not sent
    Rejected(ValidationError),
    Uploaded(Receipt),
    Failed(ApiError),
}

impl UploadOutcome {
    pub fn status(&self) -> UploadStatus {
        match self {
            UploadOutcome::Rejected(e) => UploadStatus::Invalid(e.clone()),
            UploadOutcome::Uploaded(_) => UploadStatus::Succeeded,
            UploadOutcome::Failed(_) => UploadStatus::Failed,
        }
    }
}

/// Validate and send once. Nothing is retried.
pub async fn submit_upload<A: ReceiptApi + ?Sized>(api: &A, draft: &UploadDraft) -> UploadOutcome {
    let request = match draft.validate() {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "upload rejected before sending");
            return UploadOutcome::Rejected(e);
        }
    };

    match api.upload_receipt(&request).await {
        Ok(receipt) => {
            tracing::info!(id = %receipt.id, image = request.image.kind(), "receipt uploaded");
            UploadOutcome::Uploaded(receipt)
        }
        Err(e) => {
            tracing::error!(error = %e, "receipt upload failed");
            UploadOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;

    use crate::api::{ApiError, ApiResult, ReceiptApi, UploadRequest};
    use crate::models::{Receipt, ReceiptId};

    /// In-memory service that counts calls
    #[derive(Default)]
    pub struct FakeApi {
        pub stored: RefCell<Vec<Receipt>>,
        pub list_calls: Cell<u32>,
        pub upload_calls: Cell<u32>,
        pub fail_status: Option<u16>,
    }

    #[async_trait(?Send)]
    impl ReceiptApi for FakeApi {
        async fn list_receipts(&self) -> ApiResult<Vec<Receipt>> {
            self.list_calls.set(self.list_calls.get() + 1);
            Ok(self.stored.borrow().clone())
        }

        async fn upload_receipt(&self, request: &UploadRequest) -> ApiResult<Receipt> {
            self.upload_calls.set(self.upload_calls.get() + 1);
            if let Some(status) = self.fail_status {
                return Err(ApiError::Status {
                    url: "http://fake.test/api/upload".parse().unwrap(),
                    status,
                });
            }
            let receipt = Receipt {
                id: ReceiptId::new(format!("r{}", self.upload_calls.get())),
                description: request.description.clone(),
                store: request.store.clone(),
                price_with_gst: request.price,
                date: request.date,
                purpose: Some(request.purpose.clone()),
                person: Some(request.person.clone()),
                image_url: "https://images.example/stored.jpg".to_string(),
            };
            self.stored.borrow_mut().push(receipt.clone());
            Ok(receipt)
        }
    }
}
