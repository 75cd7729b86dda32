//! Filter Bar Component
//!
//! Person/purpose selects. Choices take effect on "Apply Filters".

use leptos::prelude::*;

use crate::components::tag_select::{person_options, purpose_options, TagSelect};
use crate::list_state::ReceiptListState;
use crate::listing::ReceiptFilter;
use crate::models::{Person, Purpose};

#[component]
pub fn FilterBar(list: RwSignal<ReceiptListState>) -> impl IntoView {
    // Pending choices; empty means "all"
    let person = RwSignal::new(String::new());
    let purpose = RwSignal::new(String::new());

    let apply = move |_| {
        let filter = ReceiptFilter {
            person: Some(person.get_untracked()).filter(|p| !p.is_empty()).map(|p| Person::parse(&p)),
            purpose: Some(purpose.get_untracked()).filter(|p| !p.is_empty()).map(|p| Purpose::parse(&p)),
        };
        tracing::debug!(?filter, "applying filter");
        list.update(|l| l.apply_filter(filter));
    };

    let clear = move |_| {
        person.set(String::new());
        purpose.set(String::new());
        list.update(|l| l.clear_filter());
    };

    view! {
        <div class="filter-bar">
            <TagSelect
                label="Person"
                options=person_options()
                value=person.into()
                on_change=move |v: String| person.set(v)
                any_label="All"
            />
            <TagSelect
                label="Purpose"
                options=purpose_options()
                value=purpose.into()
                on_change=move |v: String| purpose.set(v)
                any_label="All"
            />
            <button type="button" on:click=apply>"Apply Filters"</button>
            <button type="button" class="secondary" on:click=clear>"Clear Filters"</button>
        </div>
    }
}
