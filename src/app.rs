//! Receipt Tracker App
//!
//! Single page: upload form above the receipt list.

use leptos::prelude::*;

use crate::components::{ReceiptList, UploadForm};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::list_state::ReceiptListState;
use crate::models::Receipt;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let list = RwSignal::new(ReceiptListState::new(config.page_size));

    // Provide context to all children
    provide_context(AppContext::new(config));

    let on_uploaded = Callback::new(move |receipt: Receipt| {
        list.update(|l| l.push_uploaded(receipt));
    });

    view! {
        <main class="app-layout">
            <h1>"Receipt Tracker"</h1>
            <UploadForm on_uploaded=on_uploaded />
            <ReceiptList list=list />
        </main>
    }
}
