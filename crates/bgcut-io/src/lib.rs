//! bgcut-io: Browser I/O and Dioxus component library.
//!
//! Binds the page's background-removal library, manages Blob object
//! URLs, listens for clipboard pastes and stray drags, reports failures
//! to the user, and provides the UI components for the bgcut web
//! application.

pub mod blob_url;
pub mod capability;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod dom;
pub mod notify;
pub mod presenter;

pub use capability::ImglyRemover;
pub use components::{CapabilityUnavailable, DropZone, IntakeView, ResultView};
pub use presenter::SignalPresenter;
