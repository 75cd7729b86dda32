//! Browser Glue
//!
//! Small wrappers over `web_sys` for the page, files and downloads.

use chrono::NaiveDate;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::api::SelectedFile;

/// `content` of `<meta name="{name}">` in the host page
pub fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
}

/// Date in the viewer's locale
#[cfg(target_arch = "wasm32")]
pub fn locale_date(date: NaiveDate) -> String {
    use chrono::Datelike;

    let js_date = js_sys::Date::new_with_year_month_day(date.year() as u32, date.month0() as i32, date.day() as i32);
    let locale = web_sys::window()
        .and_then(|w| w.navigator().language())
        .unwrap_or_else(|| "en-US".to_string());
    js_date
        .to_locale_date_string(&locale, &JsValue::UNDEFINED)
        .as_string()
        .unwrap_or_else(|| date.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn locale_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Read a picked file into memory
pub async fn read_file(file: web_sys::File) -> Result<SelectedFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile {
        name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

/// Offer `bytes` as a file download
pub async fn download_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = document.create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // Let the click start the download before the URL goes away
    TimeoutFuture::new(0).await;
    Url::revoke_object_url(&url)?;
    Ok(())
}
