//! Binding to the page's background-removal library.
//!
//! The library is loaded by a `<script>` tag in `index.html` and
//! exposes `window.imglyRemoveBackground.removeBackground(blob, config)`,
//! which returns a `Promise<Blob>`. [`detect`] probes for it once at
//! startup; [`ImglyRemover`] adapts it to
//! [`BackgroundRemover`](bgcut_intake::BackgroundRemover).

use std::rc::Rc;

use bgcut_intake::{
    Availability, BackgroundRemover, InputImage, OutputConfig, Progress, RemovalFailure,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::blob_url;

/// Global object the library's UMD bundle installs on `window`.
pub const GLOBAL_NAMESPACE: &str = "imglyRemoveBackground";

/// Function name inside [`GLOBAL_NAMESPACE`].
pub const ENTRY_POINT: &str = "removeBackground";

/// The library's `removeBackground` function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImglyRemover {
    function: js_sys::Function,
}

/// Probe `window` for the library.
///
/// Runs once at startup; an [`Availability::Unavailable`] result
/// disables the feature for the life of the page.
#[must_use]
pub fn detect() -> Availability<ImglyRemover> {
    let Some(window) = web_sys::window() else {
        return Availability::Unavailable("no global window".into());
    };
    let namespace = js_sys::Reflect::get(&window, &JsValue::from_str(GLOBAL_NAMESPACE))
        .unwrap_or(JsValue::UNDEFINED);
    if namespace.is_undefined() || namespace.is_null() {
        return Availability::Unavailable(format!("window.{GLOBAL_NAMESPACE} is not defined"));
    }
    let function = js_sys::Reflect::get(&namespace, &JsValue::from_str(ENTRY_POINT))
        .unwrap_or(JsValue::UNDEFINED);
    if !function.is_function() {
        return Availability::Unavailable(format!(
            "window.{GLOBAL_NAMESPACE}.{ENTRY_POINT} is not a function"
        ));
    }
    Availability::Available(ImglyRemover {
        function: function.unchecked_into(),
    })
}

impl BackgroundRemover for ImglyRemover {
    #[allow(clippy::future_not_send)] // WASM is single-threaded; JS values are !Send
    async fn remove_background(
        &self,
        image: &InputImage,
        config: &OutputConfig,
        progress: Rc<dyn Fn(Progress)>,
    ) -> Result<Vec<u8>, RemovalFailure> {
        // Yield to the browser event loop so it can paint the loading
        // state before the library starts decoding on this thread.
        gloo_timers::future::TimeoutFuture::new(0).await;

        let input = blob_url::blob_from_bytes(&image.bytes, &image.mime)
            .map_err(|e| RemovalFailure::with_message(e.to_string()))?;
        let options = options_object(config)?;

        // Ownership passes to JS: a report the library sends after the
        // promise settles must still land on a live closure. The
        // controller ignores such reports.
        let on_progress = Closure::<dyn FnMut(JsValue, JsValue, JsValue)>::new(
            move |key: JsValue, current: JsValue, total: JsValue| {
                progress(Progress {
                    key: key.as_string().unwrap_or_default(),
                    current: js_count(&current),
                    total: js_count(&total),
                });
            },
        )
        .into_js_value();
        js_sys::Reflect::set(&options, &JsValue::from_str("progress"), &on_progress)
            .map_err(|e| failure_from_js(&e))?;

        let promise = self
            .function
            .call2(&JsValue::NULL, &input, &options)
            .map_err(|e| failure_from_js(&e))?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| RemovalFailure::with_message(format!("{ENTRY_POINT} did not return a promise")))?;

        let output = JsFuture::from(promise)
            .await
            .map_err(|e| failure_from_js(&e))?
            .dyn_into::<web_sys::Blob>()
            .map_err(|_| RemovalFailure::with_message(format!("{ENTRY_POINT} did not resolve to a Blob")))?;

        blob_url::read_blob(&output)
            .await
            .map_err(|e| RemovalFailure::with_message(e.to_string()))
    }
}

/// Convert `config` into the plain JS options object.
fn options_object(config: &OutputConfig) -> Result<JsValue, RemovalFailure> {
    let json = serde_json::to_string(config)
        .map_err(|e| RemovalFailure::with_message(format!("failed to serialize config: {e}")))?;
    js_sys::JSON::parse(&json).map_err(|e| failure_from_js(&e))
}

/// Reduce a promise rejection to a [`RemovalFailure`].
///
/// Plain strings are used as-is; Error-like objects contribute their
/// `message` property; anything else carries no detail.
#[must_use]
pub fn failure_from_js(value: &JsValue) -> RemovalFailure {
    if let Some(text) = value.as_string() {
        return RemovalFailure::with_message(text);
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .map_or_else(RemovalFailure::unknown, RemovalFailure::with_message)
}

/// Read a non-negative JS number as a count; anything else is 0.
fn js_count(value: &JsValue) -> u64 {
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map_or(0, |n| {
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = n as u64;
            count
        })
}
