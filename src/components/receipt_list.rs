//! Receipt List Component
//!
//! Fetches all receipts once, then filters and pages them locally.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ReceiptApi;
use crate::components::export_button::ExportButton;
use crate::components::filter_bar::FilterBar;
use crate::components::page_buttons::PageButtons;
use crate::components::receipt_detail_modal::ReceiptDetailModal;
use crate::components::receipt_table::ReceiptTable;
use crate::context::AppContext;
use crate::list_state::{ListView, ReceiptListState};

#[component]
pub fn ReceiptList(list: RwSignal<ReceiptListState>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Load on mount and on every retry
    Effect::new(move |_| {
        let attempt = reload_trigger.get();
        let api = ctx.api();
        list.update(|l| l.begin_loading());
        spawn_local(async move {
            match api.list_receipts().await {
                Ok(fetched) => {
                    tracing::info!(count = fetched.len(), attempt, "receipts loaded");
                    list.update(|l| l.finish_loading(fetched));
                }
                Err(e) => {
                    tracing::error!(error = %e, attempt, "failed to load receipts");
                    list.update(|l| l.fail_loading(e.to_string()));
                }
            }
        });
    });

    let retry = move |_| set_reload_trigger.update(|n| *n += 1);

    view! {
        <section class="receipt-list">
            <div class="list-header">
                <h2>"Receipts"</h2>
                <ExportButton list=list />
            </div>
            <FilterBar list=list />
            {move || match list.with(|l| l.view()) {
                ListView::Loading => view! { <p class="list-message">"Loading receipts..."</p> }.into_any(),
                ListView::Failed(message) => view! {
                    <div class="list-message error">
                        <p>"Could not load receipts: " {message}</p>
                        <button type="button" on:click=retry>"Retry"</button>
                    </div>
                }
                .into_any(),
                ListView::EmptyFiltered => {
                    view! { <p class="list-message">"No receipts match the selected filters."</p> }.into_any()
                }
                ListView::Ready => view! {
                    <p class="list-count">{move || format!("{} receipts", list.with(|l| l.visible_count()))}</p>
                    <ReceiptTable list=list />
                    <PageButtons list=list />
                }
                .into_any(),
            }}
            <ReceiptDetailModal list=list />
        </section>
    }
}
