//! UI Components
//!
//! Leptos components for the receipt page.

mod camera_modal;
mod export_button;
mod filter_bar;
mod page_buttons;
mod receipt_detail_modal;
mod receipt_list;
mod receipt_table;
mod tag_select;
mod upload_form;

pub use receipt_list::ReceiptList;
pub use upload_form::UploadForm;
