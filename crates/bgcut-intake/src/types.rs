//! Shared data types for the intake controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;

/// The input channel an image arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    /// Selected with the file picker.
    FilePicker,
    /// Dropped onto the drop zone.
    DragDrop,
    /// Pasted from the clipboard.
    Clipboard,
}

impl InputSource {
    /// Short lowercase label, used in console diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FilePicker => "file picker",
            Self::DragDrop => "drag and drop",
            Self::Clipboard => "clipboard",
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An image supplied by the user, normalized from one input channel.
///
/// Owned by the controller for the duration of one processing cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct InputImage {
    /// Raw encoded image bytes, exactly as the browser handed them over.
    pub bytes: Vec<u8>,
    /// Original filename, including its extension.
    pub name: String,
    /// MIME type (e.g. `image/jpeg`).
    pub mime: String,
    /// Where the image came from.
    pub source: InputSource,
}

impl InputImage {
    /// Create a new input image.
    #[must_use]
    pub fn new(
        bytes: Vec<u8>,
        name: impl Into<String>,
        mime: impl Into<String>,
        source: InputSource,
    ) -> Self {
        Self {
            bytes,
            name: name.into(),
            mime: mime.into(),
            source,
        }
    }
}

// Hand-written so that debug output does not dump megabytes of pixels.
impl fmt::Debug for InputImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputImage")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("source", &self.source)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The image returned by the background-removal capability.
///
/// The bytes have been checked to carry `format`.
#[derive(Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    /// Encoded output bytes.
    pub bytes: Vec<u8>,
    /// Verified encoding of `bytes`.
    pub format: OutputFormat,
}

impl ProcessedImage {
    /// MIME type of the encoded bytes.
    #[must_use]
    pub const fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

impl fmt::Debug for ProcessedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessedImage")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A progress report from the capability (typically model asset
/// downloads before the first run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// What is being fetched or computed (an asset key).
    pub key: String,
    /// Units completed so far.
    pub current: u64,
    /// Total units, or 0 when unknown.
    pub total: u64,
}

impl Progress {
    /// Completion percentage, clamped to `0..=100`.
    ///
    /// Returns `None` when the total is unknown.
    #[must_use]
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let pct = self.current.min(self.total).saturating_mul(100) / self.total;
        u8::try_from(pct).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_image_debug_omits_bytes() {
        let img = InputImage::new(vec![0; 4096], "cat.png", "image/png", InputSource::DragDrop);
        let dbg = format!("{img:?}");
        assert!(dbg.contains("cat.png"));
        assert!(dbg.contains("len: 4096"));
        assert!(!dbg.contains("[0, 0"));
    }

    #[test]
    fn source_labels() {
        assert_eq!(InputSource::Clipboard.to_string(), "clipboard");
        assert_eq!(InputSource::FilePicker.label(), "file picker");
    }

    #[test]
    fn progress_percent() {
        let p = Progress {
            key: "fetch:/models/isnet".into(),
            current: 25,
            total: 200,
        };
        assert_eq!(p.percent(), Some(12));
    }

    #[test]
    fn progress_percent_unknown_total() {
        let p = Progress {
            key: "compute:inference".into(),
            current: 3,
            total: 0,
        };
        assert_eq!(p.percent(), None);
    }

    #[test]
    fn progress_percent_clamps_overshoot() {
        let p = Progress {
            key: "fetch:/models/isnet".into(),
            current: 300,
            total: 200,
        };
        assert_eq!(p.percent(), Some(100));
    }

    #[test]
    fn processed_image_mime_follows_format() {
        let out = ProcessedImage {
            bytes: vec![],
            format: OutputFormat::Png,
        };
        assert_eq!(out.mime(), "image/png");
    }
}
