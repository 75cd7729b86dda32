//! Receipt Table Component
//!
//! Current page of receipts; "View" opens the detail modal.

use leptos::prelude::*;

use crate::browser::locale_date;
use crate::list_state::ReceiptListState;
use crate::models::Receipt;

#[component]
pub fn ReceiptTable(list: RwSignal<ReceiptListState>) -> impl IntoView {
    let rows = move || list.with(|l| l.current_page_items().to_vec());

    view! {
        <table class="receipt-table">
            <thead>
                <tr>
                    <th>"Description"</th>
                    <th>"Store"</th>
                    <th>"Price with GST"</th>
                    <th>"Date"</th>
                    <th>"Purpose"</th>
                    <th>"Person"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=rows
                    key=|r: &Receipt| r.id.clone()
                    children=move |receipt: Receipt| {
                        let id = receipt.id.clone();
                        view! {
                            <tr>
                                <td>{receipt.description.clone()}</td>
                                <td>{receipt.store.clone()}</td>
                                <td class="price">{receipt.price_label()}</td>
                                <td>{receipt.date.map(locale_date).unwrap_or_default()}</td>
                                <td>{receipt.purpose_label().to_string()}</td>
                                <td>{receipt.person_label().to_string()}</td>
                                <td>
                                    <button type="button" class="link-btn" on:click=move |_| list.update(|l| l.open_detail(&id))>
                                        "View"
                                    </button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
