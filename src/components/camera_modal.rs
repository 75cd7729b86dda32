//! Camera Modal Component
//!
//! Live preview with capture and close actions. The stream is released on
//! capture, on close, and when the modal unmounts.

use leptos::prelude::*;
use leptos_camera::{
    capture_frame, create_camera, start_camera, stop_camera, CameraError, CameraStatus, FacingMode, JPEG_MIME,
};

use crate::api::CapturedImage;

#[component]
pub fn CameraModal(
    #[prop(into)] on_capture: Callback<CapturedImage>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let camera = create_camera();
    let (capture_error, set_capture_error) = signal::<Option<CameraError>>(None);

    start_camera(camera, FacingMode::Environment);

    let capture = move |_| match capture_frame(&camera, JPEG_MIME) {
        Ok(data_url) => match CapturedImage::new(data_url) {
            Some(image) => {
                tracing::debug!("frame captured");
                on_capture.run(image);
            }
            None => {
                tracing::warn!("canvas produced a non-image data URL");
                set_capture_error.set(Some(CameraError::Browser("unexpected image encoding".to_string())));
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "capture failed");
            set_capture_error.set(Some(e));
        }
    };

    let close = move |_| {
        stop_camera(&camera);
        on_close.run(());
    };

    let message = move || match camera.status_read.get() {
        CameraStatus::Starting => Some("Starting camera...".to_string()),
        CameraStatus::Failed(e) => Some(e.to_string()),
        _ => capture_error.get().map(|e| e.to_string()),
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal camera-modal">
                <video node_ref=camera.video_ref class="camera-preview" autoplay=true playsinline=true muted=true></video>
                {move || message().map(|text| view! { <p class="camera-message">{text}</p> })}
                <div class="modal-actions">
                    <button type="button" on:click=capture disabled=move || !camera.is_live()>
                        "Capture"
                    </button>
                    <button type="button" class="secondary" on:click=close>
                        "Close"
                    </button>
                </div>
            </div>
        </div>
    }
}
