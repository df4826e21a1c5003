//! UI state emitted by the controller.
//!
//! The presentation layer renders whatever [`UiState`] it was last
//! handed; it never mutates it. Transitions:
//!
//! ```text
//! Idle -> Loading -> PreviewReady | Error -> (next cycle) -> Loading
//! ```

use std::rc::Rc;

use crate::error::FailureNotice;
use crate::types::{ProcessedImage, Progress};

/// A successfully processed image, ready for display and download.
#[derive(Debug, Clone)]
pub struct Preview {
    /// Generation of the cycle that produced this preview.
    pub generation: u64,
    /// The processed image. Shared so that re-renders do not copy bytes.
    pub image: Rc<ProcessedImage>,
    /// Filename offered by the download link.
    pub download_name: String,
}

// Pointer equality on the image: two previews are the same preview only
// if they came from the same run.
impl PartialEq for Preview {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation
            && Rc::ptr_eq(&self.image, &other.image)
            && self.download_name == other.download_name
    }
}

/// What the page should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    /// Nothing processed yet.
    #[default]
    Idle,
    /// A cycle is in flight; any previous preview and download link are
    /// hidden.
    Loading {
        /// Latest progress report, if the capability sent one.
        progress: Option<Progress>,
    },
    /// The latest cycle succeeded.
    PreviewReady(Preview),
    /// The latest cycle failed.
    Error(FailureNotice),
}

impl UiState {
    /// `Loading` with no progress yet.
    pub const LOADING: Self = Self::Loading { progress: None };

    /// Whether the loading indicator should be visible.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The preview to show, if any.
    #[must_use]
    pub const fn preview(&self) -> Option<&Preview> {
        match self {
            Self::PreviewReady(preview) => Some(preview),
            _ => None,
        }
    }

    /// The failure to show, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&FailureNotice> {
        match self {
            Self::Error(notice) => Some(notice),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::FailureKind;

    fn preview(generation: u64) -> Preview {
        Preview {
            generation,
            image: Rc::new(ProcessedImage {
                bytes: vec![1, 2, 3],
                format: OutputFormat::Png,
            }),
            download_name: "bg_removed_a_20240101T000000.png".into(),
        }
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(UiState::default(), UiState::Idle);
        assert!(!UiState::Idle.is_loading());
    }

    #[test]
    fn loading_hides_preview() {
        let state = UiState::LOADING;
        assert!(state.is_loading());
        assert!(state.preview().is_none());
        assert!(state.failure().is_none());
    }

    #[test]
    fn preview_ready_exposes_preview() {
        let p = preview(3);
        let state = UiState::PreviewReady(p.clone());
        assert!(!state.is_loading());
        assert_eq!(state.preview(), Some(&p));
    }

    #[test]
    fn previews_with_equal_bytes_from_different_runs_differ() {
        let a = preview(1);
        let b = preview(1);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn error_exposes_notice() {
        let notice = FailureNotice {
            kind: FailureKind::Processing,
            detail: None,
        };
        let state = UiState::Error(notice.clone());
        assert_eq!(state.failure(), Some(&notice));
        assert!(!state.is_loading());
    }
}
