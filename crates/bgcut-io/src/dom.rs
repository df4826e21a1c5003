//! Page-level DOM wiring that Dioxus components cannot express.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;

/// Drag events whose default action is suppressed page-wide.
const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

/// Errors that can occur when wiring page-level listeners.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// A browser API call returned an error or a required object was missing.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Stop the browser from navigating to files dropped outside the drop
/// zone.
///
/// Installs one listener on `window` for every drag event. The drop
/// zone's handlers run before the event bubbles up to `window`, so they
/// still see the files.
///
/// # Errors
///
/// Returns [`DomError::JsError`] if the window is unavailable or a
/// listener cannot be attached.
pub fn suppress_default_drag() -> Result<(), DomError> {
    let window = web_sys::window().ok_or_else(|| DomError::JsError("no global window".into()))?;

    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        event.prevent_default();
        event.stop_propagation();
    });
    for name in DRAG_EVENTS {
        window.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
    }
    listener.forget(); // leak — lives for the page lifetime

    Ok(())
}

/// Clear a file input so that picking the same file again still fires
/// `change`.
///
/// Best-effort: a missing element is ignored.
pub fn reset_file_input(id: &str) {
    let input = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok());
    if let Some(input) = input {
        input.set_value("");
    }
}
