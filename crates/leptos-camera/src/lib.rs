//! Leptos Camera Utilities
//!
//! Still-image capture from a device camera for Leptos.
//! The live stream is owned by a [`StreamGuard`]; dropping the guard stops
//! every track, so the device is released on capture, on close, on unmount,
//! and when a stream resolves after the camera was already closed.

use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream, MediaStreamConstraints,
    MediaStreamTrack,
};

/// Default encoding for captured stills
pub const JPEG_MIME: &str = "image/jpeg";

/// Which camera to prefer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacingMode {
    /// Front camera
    User,
    /// Rear camera
    #[default]
    Environment,
}

impl FacingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

#[derive(Serialize)]
struct Ideal<T> {
    ideal: T,
}

/// `video` member of the getUserMedia constraints.
/// Every member is `ideal`, so devices without a match still open.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    facing_mode: Ideal<&'static str>,
    width: Ideal<u32>,
    height: Ideal<u32>,
}

impl VideoConstraints {
    pub fn new(facing: FacingMode) -> Self {
        Self {
            facing_mode: Ideal { ideal: facing.as_str() },
            width: Ideal { ideal: 1920 },
            height: Ideal { ideal: 1080 },
        }
    }
}

/// Camera failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera access is not supported in this browser")]
    Unsupported,
    #[error("camera access was denied")]
    AccessDenied,
    #[error("no camera was found")]
    NoDevice,
    #[error("camera not ready")]
    NotReady,
    #[error("camera error: {0}")]
    Browser(String),
}

impl CameraError {
    /// Map a getUserMedia rejection name to an error
    pub fn from_rejection_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" => CameraError::AccessDenied,
            "NotFoundError" | "OverconstrainedError" => CameraError::NoDevice,
            "TypeError" | "NotSupportedError" => CameraError::Unsupported,
            other => CameraError::Browser(other.to_string()),
        }
    }

    fn from_rejection(value: JsValue) -> Self {
        match js_sys::Reflect::get(&value, &JsValue::from_str("name"))
            .ok()
            .and_then(|name| name.as_string())
        {
            Some(name) => Self::from_rejection_name(&name),
            None => CameraError::from(value),
        }
    }
}

impl From<JsValue> for CameraError {
    fn from(value: JsValue) -> Self {
        CameraError::Browser(format!("{:?}", value))
    }
}

/// Something holding live media tracks
pub trait MediaSource {
    fn stop_tracks(&self);
}

impl MediaSource for MediaStream {
    fn stop_tracks(&self) {
        for track in self.get_tracks().iter() {
            track.unchecked_into::<MediaStreamTrack>().stop();
        }
    }
}

/// Owns a live stream; stops its tracks when released or dropped
pub struct StreamGuard<S: MediaSource = MediaStream> {
    source: Option<S>,
}

impl<S: MediaSource> StreamGuard<S> {
    pub fn new(source: S) -> Self {
        Self { source: Some(source) }
    }

    pub fn empty() -> Self {
        Self { source: None }
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.source.is_some()
    }

    /// Stop all tracks. Returns whether a stream was held.
    pub fn release(&mut self) -> bool {
        match self.source.take() {
            Some(source) => {
                source.stop_tracks();
                true
            }
            None => false,
        }
    }
}

impl<S: MediaSource> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Observable camera state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CameraStatus {
    Idle,
    /// Waiting for the browser (permission prompt, device start)
    Starting,
    Live,
    Failed(CameraError),
}

/// Camera state signals
#[derive(Clone, Copy)]
pub struct CameraSignals {
    pub status_read: ReadSignal<CameraStatus>,
    pub status_write: WriteSignal<CameraStatus>,
    /// Bind to the `<video>` showing the live preview
    pub video_ref: NodeRef<Video>,
    stream: StoredValue<StreamGuard, LocalStorage>,
}

impl CameraSignals {
    pub fn is_live(&self) -> bool {
        self.status_read.get() == CameraStatus::Live
    }
}

/// Create camera signals scoped to the current owner.
/// The stream is released when the owner is cleaned up.
pub fn create_camera() -> CameraSignals {
    let (status_read, status_write) = signal(CameraStatus::Idle);
    let video_ref = NodeRef::<Video>::new();
    let stream = StoredValue::new_local(StreamGuard::empty());

    // Attach a stream that arrived before the <video> was mounted
    Effect::new(move |_| {
        if let Some(video) = video_ref.get() {
            stream.with_value(|guard| {
                if let Some(source) = guard.source() {
                    attach(&video, source);
                }
            });
        }
    });

    on_cleanup(move || {
        stream.try_update_value(|guard| guard.release());
    });

    CameraSignals {
        status_read,
        status_write,
        video_ref,
        stream,
    }
}

/// Request a stream and show it in `video_ref`
pub fn start_camera(camera: CameraSignals, facing: FacingMode) {
    camera.status_write.set(CameraStatus::Starting);

    spawn_local(async move {
        match request_stream(facing).await {
            Ok(stream) => {
                let guard = StreamGuard::new(stream);
                // Closed or unmounted while the permission prompt was open
                if camera.status_read.try_get_untracked() != Some(CameraStatus::Starting) {
                    tracing::debug!(target: "leptos_camera", "stream arrived after close; releasing");
                    drop(guard);
                    return;
                }
                if let (Some(video), Some(source)) = (camera.video_ref.get_untracked(), guard.source()) {
                    attach(&video, source);
                }
                // A disposed slot drops the closure, and the guard with it
                camera.stream.try_update_value(move |slot| *slot = guard);
                camera.status_write.try_set(CameraStatus::Live);
                tracing::info!(target: "leptos_camera", facing = facing.as_str(), "camera stream started");
            }
            Err(e) => {
                tracing::warn!(target: "leptos_camera", error = %e, "camera stream unavailable");
                camera.status_write.try_set(CameraStatus::Failed(e));
            }
        }
    });
}

/// Release the stream and detach it from the preview
pub fn stop_camera(camera: &CameraSignals) {
    let released = camera.stream.try_update_value(|guard| guard.release()).unwrap_or(false);
    if let Some(video) = camera.video_ref.get_untracked() {
        video.set_src_object(None);
    }
    camera.status_write.try_set(CameraStatus::Idle);
    if released {
        tracing::info!(target: "leptos_camera", "camera stream stopped");
    }
}

/// Encode the current preview frame as a data URL, then release the stream.
/// On `NotReady` the stream stays open so the user can try again.
pub fn capture_frame(camera: &CameraSignals, mime_type: &str) -> Result<String, CameraError> {
    let video = camera.video_ref.get_untracked().ok_or(CameraError::NotReady)?;
    let data_url = draw_still(&video, mime_type)?;
    stop_camera(camera);
    Ok(data_url)
}

async fn request_stream(facing: FacingMode) -> Result<MediaStream, CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::Unsupported)?;

    let video = serde_wasm_bindgen::to_value(&VideoConstraints::new(facing))
        .map_err(|e| CameraError::Browser(e.to_string()))?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(CameraError::from_rejection)?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(CameraError::from_rejection)?;
    stream
        .dyn_into::<MediaStream>()
        .map_err(|_| CameraError::Browser("getUserMedia did not return a MediaStream".to_string()))
}

fn attach(video: &HtmlVideoElement, stream: &MediaStream) {
    video.set_src_object(Some(stream));
    // Autoplay may be blocked until a gesture; the capture button provides one
    let _ = video.play();
}

fn draw_still(video: &HtmlVideoElement, mime_type: &str) -> Result<String, CameraError> {
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err(CameraError::NotReady);
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(CameraError::Unsupported)?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| CameraError::Browser("canvas element unavailable".to_string()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| CameraError::Browser("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CameraError::Browser("2d context unavailable".to_string()))?;
    context.draw_image_with_html_video_element_and_dw_and_dh(
        video,
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    )?;

    Ok(canvas.to_data_url_with_type(mime_type)?)
}
