//! Upload Request
//!
//! Multipart body for `POST /api/upload`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Person, Purpose};

/// Receipt image picked through the file input
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    /// MIME type reported by the browser, empty when unknown
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Still frame from the camera as a `data:image/...` URL
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage(String);

impl CapturedImage {
    pub fn new(data_url: impl Into<String>) -> Option<Self> {
        let data_url = data_url.into();
        data_url.starts_with("data:image/").then_some(Self(data_url))
    }

    pub fn data_url(&self) -> &str {
        &self.0
    }
}

/// Exactly one image travels with an upload
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptImage {
    File(SelectedFile),
    Captured(CapturedImage),
}

impl ReceiptImage {
    pub fn kind(&self) -> &'static str {
        match self {
            ReceiptImage::File(_) => "file",
            ReceiptImage::Captured(_) => "camera",
        }
    }
}

/// A validated draft, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub image: ReceiptImage,
    pub description: String,
    pub store: String,
    pub price: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub purpose: Purpose,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadPart {
    pub name: &'static str,
    pub value: PartValue,
}

impl UploadRequest {
    /// Metadata fields in the order the service documents them
    pub fn text_fields(&self) -> [(&'static str, String); 6] {
        [
            ("description", self.description.clone()),
            ("store", self.store.clone()),
            ("priceWithGST", self.price.map(|p| p.to_string()).unwrap_or_default()),
            (
                "date",
                self.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            ),
            ("purpose", self.purpose.to_string()),
            ("person", self.person.to_string()),
        ]
    }

    /// Image part first (`receipt` or `base64Image`), then the metadata
    pub fn parts(&self) -> Vec<UploadPart> {
        let image = match &self.image {
            ReceiptImage::File(file) => UploadPart {
                name: "receipt",
                value: PartValue::File {
                    file_name: file.name.clone(),
                    content_type: Some(file.content_type.clone()).filter(|ct| !ct.is_empty()),
                    bytes: file.bytes.clone(),
                },
            },
            ReceiptImage::Captured(captured) => UploadPart {
                name: "base64Image",
                value: PartValue::Text(captured.data_url().to_string()),
            },
        };

        std::iter::once(image)
            .chain(self.text_fields().into_iter().map(|(name, value)| UploadPart {
                name,
                value: PartValue::Text(value),
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(image: ReceiptImage) -> UploadRequest {
        UploadRequest {
            image,
            description: "Printer paper".to_string(),
            store: "Officeworks".to_string(),
            price: Some(Decimal::new(2495, 2)),
            date: NaiveDate::from_ymd_opt(2024, 5, 2),
            purpose: Purpose::Ecom,
            person: Person::Hesh,
        }
    }

    #[test]
    fn test_captured_image_requires_data_url() {
        assert!(CapturedImage::new("data:image/jpeg;base64,/9j/4AAQ").is_some());
        assert!(CapturedImage::new("https://images.example/a.jpg").is_none());
    }

    #[test]
    fn test_file_parts() {
        let file = SelectedFile {
            name: "receipt.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        };
        let parts = request(ReceiptImage::File(file)).parts();

        let names: Vec<_> = parts.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            ["receipt", "description", "store", "priceWithGST", "date", "purpose", "person"]
        );
        assert_eq!(
            parts[0].value,
            PartValue::File {
                file_name: "receipt.png".to_string(),
                content_type: Some("image/png".to_string()),
                bytes: vec![0x89, b'P', b'N', b'G'],
            }
        );
        assert_eq!(parts[3].value, PartValue::Text("24.95".to_string()));
        assert_eq!(parts[4].value, PartValue::Text("2024-05-02".to_string()));
        assert_eq!(parts[6].value, PartValue::Text("Hesh".to_string()));
    }

    #[test]
    fn test_captured_parts_and_blank_fields() {
        let image = CapturedImage::new("data:image/jpeg;base64,AAAA").unwrap();
        let mut req = request(ReceiptImage::Captured(image));
        req.price = None;
        req.date = None;

        let parts = req.parts();
        assert_eq!(parts[0].name, "base64Image");
        assert_eq!(parts[0].value, PartValue::Text("data:image/jpeg;base64,AAAA".to_string()));
        assert_eq!(parts[3].value, PartValue::Text(String::new()));
        assert_eq!(parts[4].value, PartValue::Text(String::new()));
    }

    #[test]
    fn test_unknown_content_type_is_omitted() {
        let file = SelectedFile {
            name: "scan".to_string(),
            content_type: String::new(),
            bytes: vec![1, 2, 3],
        };
        let parts = request(ReceiptImage::File(file)).parts();
        assert!(matches!(&parts[0].value, PartValue::File { content_type: None, .. }));
    }
}
