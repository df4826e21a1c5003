//! Blob creation, Blob reading, and object URL lifetimes.
//!
//! Every object URL handed to the page is owned by an [`ObjectUrl`],
//! which revokes it on drop. A processed image gets two of them (see
//! [`PreviewUrls`]): one for the `<img>`, revoked as soon as the image
//! has loaded, and one for the download link, kept until the next
//! cycle replaces the preview. Revoking the display URL can therefore
//! never break a later download.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use std::cell::Cell;

use bgcut_intake::Preview;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating or reading Blobs.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for BlobError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Wrap `bytes` in a `Blob` of the given MIME type.
///
/// # Errors
///
/// Returns [`BlobError::JsError`] if `Blob` construction fails.
pub fn blob_from_bytes(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, BlobError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    Ok(blob)
}

/// Read the full contents of a `Blob` (or `File`).
///
/// # Errors
///
/// Returns [`BlobError::JsError`] if the read is rejected.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Blob is !Send
pub async fn read_blob(blob: &web_sys::Blob) -> Result<Vec<u8>, BlobError> {
    let buffer = JsFuture::from(blob.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// An object URL that is revoked when dropped.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    revoked: Cell<bool>,
}

impl ObjectUrl {
    /// Create an object URL for a new Blob holding `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, BlobError> {
        let blob = blob_from_bytes(bytes, mime_type)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        Ok(Self {
            url,
            revoked: Cell::new(false),
        })
    }

    /// The `blob:` URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Release the URL now. Later calls are no-ops.
    ///
    /// Best-effort: failures are ignored since the runtime may already
    /// have reclaimed it.
    pub fn revoke(&self) {
        if !self.revoked.replace(true) {
            let _ = web_sys::Url::revoke_object_url(&self.url);
        }
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// Independent display and download URLs for one preview.
#[derive(Debug)]
pub struct PreviewUrls {
    /// Generation of the preview these URLs were made for.
    pub generation: u64,
    /// Bound to the `<img src>`; revoked once the image has loaded.
    pub display: ObjectUrl,
    /// Bound to the download link's `href`; lives until replaced.
    pub download: ObjectUrl,
}

impl PreviewUrls {
    /// Create both URLs for `preview`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::JsError`] if either URL cannot be created.
    pub fn for_preview(preview: &Preview) -> Result<Self, BlobError> {
        let mime = preview.image.mime();
        Ok(Self {
            generation: preview.generation,
            display: ObjectUrl::from_bytes(&preview.image.bytes, mime)?,
            download: ObjectUrl::from_bytes(&preview.image.bytes, mime)?,
        })
    }
}
