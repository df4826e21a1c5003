//! Image intake from clipboard paste events.
//!
//! A single `paste` listener on `window` catches pastes anywhere in the
//! document. The first clipboard item with an image MIME type is
//! handed on as a `File`; pastes without one are ignored.

use bgcut_intake::{InputImage, accept};
use futures::channel::mpsc::UnboundedSender;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;

use crate::blob_url;

/// Errors that can occur when handling clipboard pastes.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// A browser API call returned an error or a required object was missing.
    #[error("clipboard API error: {0}")]
    JsError(String),

    /// The intake view stopped listening before the paste arrived.
    #[error("intake is no longer accepting images")]
    Closed,
}

impl From<JsValue> for ClipboardError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<blob_url::BlobError> for ClipboardError {
    fn from(err: blob_url::BlobError) -> Self {
        Self::JsError(err.to_string())
    }
}

/// Listen for pastes anywhere in the document.
///
/// `on_image` is called with the first image item of every paste that
/// has one. The listener lives for the rest of the page's lifetime.
///
/// # Errors
///
/// Returns [`ClipboardError::JsError`] if the window is unavailable or
/// the listener cannot be attached.
pub fn listen_for_pastes(on_image: impl Fn(web_sys::File) + 'static) -> Result<(), ClipboardError> {
    let window =
        web_sys::window().ok_or_else(|| ClipboardError::JsError("no global window".into()))?;

    let listener = Closure::<dyn FnMut(web_sys::ClipboardEvent)>::new(
        move |event: web_sys::ClipboardEvent| {
            if let Some(file) = first_image_file(&event) {
                on_image(file);
            }
        },
    );
    window.add_event_listener_with_callback("paste", listener.as_ref().unchecked_ref())?;
    listener.forget(); // leak — lives for the page lifetime

    Ok(())
}

/// Find the first image-typed item in a paste and return it as a file.
fn first_image_file(event: &web_sys::ClipboardEvent) -> Option<web_sys::File> {
    let items = event.clipboard_data()?.items();
    let mimes: Vec<String> = (0..items.length())
        .map(|i| items.get(i).map(|item| item.type_()).unwrap_or_default())
        .collect();
    let index = accept::select_clipboard_item(mimes.iter().map(String::as_str))?;
    let item = items.get(u32::try_from(index).ok()?)?;
    item.get_as_file().ok().flatten()
}

/// Read a pasted file into an [`InputImage`].
///
/// Screenshots usually arrive with a generic or empty name; those get
/// a name derived from their MIME type.
///
/// # Errors
///
/// Returns [`ClipboardError::JsError`] if reading the file fails.
#[allow(clippy::future_not_send)] // WASM is single-threaded; File is !Send
pub async fn read_pasted(file: &web_sys::File) -> Result<InputImage, ClipboardError> {
    let bytes = blob_url::read_blob(file).await?;
    Ok(accept::pasted_image(bytes, &file.name(), &file.type_()))
}

/// Hand a pasted image to the intake queue.
///
/// # Errors
///
/// Returns [`ClipboardError::Closed`] if the receiving side is gone.
pub fn deliver(tx: &UnboundedSender<InputImage>, image: InputImage) -> Result<(), ClipboardError> {
    tx.unbounded_send(image).map_err(|_| ClipboardError::Closed)
}
