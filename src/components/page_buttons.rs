//! Page Buttons Component

use leptos::prelude::*;

use crate::list_state::ReceiptListState;

/// One button per page; the current page is highlighted
#[component]
pub fn PageButtons(list: RwSignal<ReceiptListState>) -> impl IntoView {
    view! {
        <nav class="pagination">
            <For
                each=move || list.with(|l| l.page_numbers())
                key=|n: &usize| *n
                children=move |n: usize| {
                    let is_current = move || list.with(|l| l.page()) == n;
                    view! {
                        <button
                            type="button"
                            class=move || if is_current() { "page-btn active" } else { "page-btn" }
                            on:click=move |_| list.update(|l| l.set_page(n))
                        >
                            {n}
                        </button>
                    }
                }
            />
        </nav>
    }
}
