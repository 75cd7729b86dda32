//! Export Button Component
//!
//! Downloads the full receipt list (not the filtered view) as a workbook.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser::{download_bytes, locale_date};
use crate::export::{build_workbook, ExportError, EXPORT_FILE_NAME, XLSX_MIME};
use crate::list_state::ReceiptListState;
use crate::models::Receipt;

#[component]
pub fn ExportButton(list: RwSignal<ReceiptListState>) -> impl IntoView {
    let (exporting, set_exporting) = signal(false);

    let export = move |_| {
        let receipts = list.with_untracked(|l| l.receipts().to_vec());
        set_exporting.set(true);
        spawn_local(async move {
            export_receipts(&receipts).await;
            set_exporting.set(false);
        });
    };

    view! {
        <button type="button" class="export-btn" on:click=export disabled=move || exporting.get()>
            "Export to Excel"
        </button>
    }
}

async fn export_receipts(receipts: &[Receipt]) {
    let bytes = match build_workbook(receipts, locale_date) {
        Ok(bytes) => bytes,
        Err(ExportError::Empty) => {
            tracing::warn!("no receipts to export");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "export failed");
            return;
        }
    };

    match download_bytes(&bytes, EXPORT_FILE_NAME, XLSX_MIME).await {
        Ok(()) => tracing::info!(rows = receipts.len(), file = EXPORT_FILE_NAME, "receipts exported"),
        Err(e) => tracing::error!(error = ?e, "download failed"),
    }
}
