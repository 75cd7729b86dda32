//! Tag Select Component
//!
//! Reusable `<select>` for purpose and person tags.

use leptos::prelude::*;

use crate::models::{Person, Purpose};

pub fn purpose_options() -> Vec<String> {
    Purpose::ALL.iter().map(|p| p.as_str().to_string()).collect()
}

pub fn person_options() -> Vec<String> {
    Person::ALL.iter().map(|p| p.as_str().to_string()).collect()
}

/// Labelled select over fixed options.
/// With `any_label`, an extra empty-valued first option stands for "no choice".
#[component]
pub fn TagSelect(
    #[prop(into)] label: String,
    options: Vec<String>,
    value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional)] any_label: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="tag-select">
            <span>{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {any_label.map(|any| view! { <option value="">{any}</option> })}
                {options.into_iter().map(|option| {
                    let selected = option.clone();
                    let option_value = option.clone();
                    view! {
                        <option value=option_value selected=move || value.get() == selected>
                            {option}
                        </option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}
