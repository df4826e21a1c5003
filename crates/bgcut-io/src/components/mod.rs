//! Dioxus UI components for bgcut.
//!
//! Provides the drop zone (click, drag-and-drop), the result view
//! (loading indicator, preview, download link), the static notice shown
//! when the library is missing, and the intake view that wires them to
//! the controller.

mod drop_zone;
mod intake;
mod result_view;
mod unavailable;

pub use drop_zone::{DropZone, FILE_INPUT_ID};
pub use intake::IntakeView;
pub use result_view::ResultView;
pub use unavailable::CapabilityUnavailable;
