//! Upload Form Component
//!
//! Receipt image (file or camera) plus metadata, sent as one multipart
//! request.

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::CapturedImage;
use crate::browser;
use crate::components::camera_modal::CameraModal;
use crate::components::tag_select::{person_options, purpose_options, TagSelect};
use crate::context::AppContext;
use crate::models::{Person, Purpose, Receipt};
use crate::upload_draft::{submit_upload, UploadDraft, UploadOutcome, UploadStatus};

/// Form for uploading a new receipt
#[component]
pub fn UploadForm(#[prop(into)] on_uploaded: Callback<Receipt>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let draft = RwSignal::new(UploadDraft::default());
    let status = RwSignal::new(UploadStatus::Idle);
    let camera_open = RwSignal::new(false);
    let file_input = NodeRef::<Input>::new();

    let clear_file_input = move || {
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let on_file_change = move |_| {
        status.set(UploadStatus::Idle);
        let Some(ticket) = draft.try_update(|d| d.begin_file_selection()) else {
            return;
        };
        let Some(file) = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        spawn_local(async move {
            match browser::read_file(file).await {
                Ok(selected) => {
                    let (name, bytes) = (selected.name.clone(), selected.bytes.len());
                    let applied = draft
                        .try_update(|d| d.finish_file_selection(ticket, selected))
                        .unwrap_or(false);
                    if applied {
                        tracing::debug!(%name, bytes, "file selected");
                    } else {
                        tracing::debug!(%name, "file read superseded by a newer image");
                    }
                }
                Err(e) => tracing::warn!(error = ?e, "could not read selected file"),
            }
        });
    };

    let on_capture = Callback::new(move |image: CapturedImage| {
        clear_file_input();
        draft.update(|d| d.set_captured(image));
        camera_open.set(false);
    });

    let open_camera = move |_| {
        status.set(UploadStatus::Idle);
        camera_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked() == UploadStatus::Uploading {
            return;
        }
        let current = draft.get_untracked();
        let api = ctx.api();
        status.set(UploadStatus::Uploading);

        spawn_local(async move {
            let outcome = submit_upload(&api, &current).await;
            let next = outcome.status();
            if let UploadOutcome::Uploaded(receipt) = outcome {
                on_uploaded.run(receipt);
                draft.update(|d| d.reset());
                clear_file_input();
            }
            status.set(next);
        });
    };

    view! {
        <form class="upload-form" on:submit=on_submit>
            <h2>"Upload Receipt"</h2>

            <div class="image-row">
                <input type="file" accept="image/*" node_ref=file_input on:change=on_file_change />
                <button type="button" class="secondary" on:click=open_camera>"Use Camera"</button>
            </div>

            {move || draft.with(|d| d.captured_preview().map(str::to_string)).map(|src| view! {
                <img class="capture-preview" src=src alt="Captured receipt" />
            })}

            {text_field(draft, "Description", "text", |d| &d.description, |d, v| d.description = v)}
            {text_field(draft, "Store", "text", |d| &d.store, |d, v| d.store = v)}
            {text_field(draft, "Price with GST", "text", |d| &d.price, |d, v| d.price = v)}
            {text_field(draft, "Date", "date", |d| &d.date, |d, v| d.date = v)}

            <TagSelect
                label="Purpose"
                options=purpose_options()
                value=Signal::derive(move || draft.with(|d| d.purpose.to_string()))
                on_change=move |v: String| draft.update(|d| d.purpose = Purpose::parse(&v))
            />
            <TagSelect
                label="Person"
                options=person_options()
                value=Signal::derive(move || draft.with(|d| d.person.to_string()))
                on_change=move |v: String| draft.update(|d| d.person = Person::parse(&v))
            />

            <button type="submit" disabled=move || status.get() == UploadStatus::Uploading>
                {move || if status.get() == UploadStatus::Uploading { "Uploading..." } else { "Upload" }}
            </button>

            {move || {
                let current = status.get();
                let message = current.message();
                (!message.is_empty() && current != UploadStatus::Uploading).then(|| view! {
                    <p class={if current.is_error() { "status error" } else { "status" }}>{message}</p>
                })
            }}

            <Show when=move || camera_open.get()>
                <CameraModal on_capture=on_capture on_close=move |_: ()| camera_open.set(false) />
            </Show>
        </form>
    }
}

/// Labelled text input bound to one draft field
fn text_field(
    draft: RwSignal<UploadDraft>,
    label: &'static str,
    kind: &'static str,
    get: fn(&UploadDraft) -> &String,
    set: fn(&mut UploadDraft, String),
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type=kind
                prop:value=move || draft.with(|d| get(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        </label>
    }
}
