//! Error taxonomy and user-facing failure notices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;

/// Generic text shown for any processing failure.
pub const PROCESSING_FAILED: &str = "An error occurred while processing the image.";

/// Hint appended when a failure looks like a model asset fetch problem.
pub const ASSET_LOAD_HINT: &str = "(The background-removal model may have failed to load. \
     Check your network connection and try again.)";

/// Text shown when a non-image input is selected or dropped.
pub const UNSUPPORTED_INPUT: &str = "Please choose an image file.";

/// Text shown when the capability is missing at startup.
pub const CAPABILITY_MISSING: &str = "The background-removal library failed to load. \
     Reload the page or check the developer console.";

/// The capability rejected a call.
///
/// The rejection value is either an Error-like object or a plain
/// string; both are reduced to an optional message here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or("unknown error"))]
pub struct RemovalFailure {
    /// Human-readable rejection text, when the capability supplied one.
    pub message: Option<String>,
}

impl RemovalFailure {
    /// A failure carrying `message`. Blank messages are dropped.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: (!message.trim().is_empty()).then_some(message),
        }
    }

    /// A failure with no usable detail.
    #[must_use]
    pub const fn unknown() -> Self {
        Self { message: None }
    }

    /// Whether the failure text mentions the model, which in practice
    /// means its assets could not be fetched.
    #[must_use]
    pub fn suggests_asset_load(&self) -> bool {
        self.message.as_deref().is_some_and(|m| m.contains("model"))
    }
}

/// Errors that can occur while accepting or processing an image.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    /// The selected or dropped file is not an image.
    #[error("unsupported input type {mime:?} for {name:?}")]
    UnsupportedInputType {
        /// Filename as supplied.
        name: String,
        /// MIME type that failed the check.
        mime: String,
    },

    /// The input carried no bytes.
    #[error("input image data is empty")]
    EmptyInput,

    /// The capability rejected the call.
    #[error("background removal failed: {0}")]
    Processing(#[from] RemovalFailure),

    /// The capability resolved with something other than the requested
    /// encoding.
    #[error("expected {expected} output, got {actual}")]
    UnexpectedOutput {
        /// Requested format.
        expected: OutputFormat,
        /// What the bytes were sniffed as.
        actual: String,
    },

    /// Configuration is invalid.
    #[error("invalid intake configuration: {0}")]
    InvalidConfig(String),

    /// The capability is absent; the feature is disabled.
    #[error("background removal is unavailable: {0}")]
    MissingCapability(String),
}

/// Category of a user-facing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Input rejected before processing.
    UnsupportedInput,
    /// Processing failed.
    Processing,
    /// Processing failed and the failure points at model assets.
    AssetLoadSuspected,
    /// The capability never loaded.
    Unavailable,
}

/// What the user is told about a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureNotice {
    /// Failure category; picks the wording.
    pub kind: FailureKind,
    /// Extra detail appended to the message, if any.
    pub detail: Option<String>,
}

impl FailureNotice {
    /// Map an error to the notice shown for it.
    #[must_use]
    pub fn from_error(err: &IntakeError) -> Self {
        match err {
            IntakeError::UnsupportedInputType { .. } | IntakeError::EmptyInput => Self {
                kind: FailureKind::UnsupportedInput,
                detail: None,
            },
            IntakeError::Processing(failure) => Self {
                kind: if failure.suggests_asset_load() {
                    FailureKind::AssetLoadSuspected
                } else {
                    FailureKind::Processing
                },
                detail: failure.message.clone(),
            },
            IntakeError::UnexpectedOutput { .. } | IntakeError::InvalidConfig(_) => Self {
                kind: FailureKind::Processing,
                detail: Some(err.to_string()),
            },
            IntakeError::MissingCapability(reason) => Self {
                kind: FailureKind::Unavailable,
                detail: Some(reason.clone()),
            },
        }
    }

    /// Full alert text, one line per part.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            FailureKind::UnsupportedInput => UNSUPPORTED_INPUT.to_owned(),
            FailureKind::Unavailable => CAPABILITY_MISSING.to_owned(),
            FailureKind::Processing | FailureKind::AssetLoadSuspected => {
                let mut text = String::from(PROCESSING_FAILED);
                if let Some(ref detail) = self.detail {
                    text.push_str("\nDetails: ");
                    text.push_str(detail);
                }
                if self.kind == FailureKind::AssetLoadSuspected {
                    text.push('\n');
                    text.push_str(ASSET_LOAD_HINT);
                }
                text
            }
        }
    }
}

impl fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<&IntakeError> for FailureNotice {
    fn from(err: &IntakeError) -> Self {
        Self::from_error(err)
    }
}
