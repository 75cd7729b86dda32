//! Receipt Detail Modal
//!
//! All fields of the selected receipt plus its image.

use leptos::prelude::*;

use crate::browser::locale_date;
use crate::list_state::ReceiptListState;

#[component]
pub fn ReceiptDetailModal(list: RwSignal<ReceiptListState>) -> impl IntoView {
    let close = move || list.update(|l| l.close_detail());

    move || {
        list.with(|l| l.selected_receipt().cloned()).map(|receipt| {
            let date = receipt.date.map(locale_date).unwrap_or_default();
            view! {
                <div class="modal-backdrop" on:click=move |_| close()>
                    <div class="modal receipt-detail" on:click=|ev| ev.stop_propagation()>
                        <h3>{receipt.description.clone()}</h3>
                        <dl>
                            <dt>"Store"</dt>
                            <dd>{receipt.store.clone()}</dd>
                            <dt>"Price with GST"</dt>
                            <dd>{receipt.price_label()}</dd>
                            <dt>"Date"</dt>
                            <dd>{date}</dd>
                            <dt>"Purpose"</dt>
                            <dd>{receipt.purpose_label().to_string()}</dd>
                            <dt>"Person"</dt>
                            <dd>{receipt.person_label().to_string()}</dd>
                        </dl>
                        <img class="receipt-image" src=receipt.image_url.clone() alt="Receipt" />
                        <div class="modal-actions">
                            <button type="button" on:click=move |_| close()>"Close"</button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
