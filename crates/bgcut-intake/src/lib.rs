//! bgcut-intake: Image intake controller (sans-IO).
//!
//! Accepts an image from any input channel (file picker, drag-and-drop,
//! clipboard paste), normalizes it to a single [`InputImage`], hands it
//! to a [`BackgroundRemover`], and reports the outcome as a sequence of
//! [`UiState`] values through a [`Presenter`].
//!
//! This crate has **no browser dependencies** -- the remover and the
//! presenter are traits, implemented for the real page in `bgcut-io`
//! and by fakes in tests.

pub mod accept;
pub mod config;
pub mod controller;
pub mod error;
pub mod naming;
pub mod state;
pub mod types;

pub use config::{IntakeConfig, OutputConfig, OutputFormat, OutputKind, OutputOptions};
pub use controller::{
    Availability, BackgroundRemover, Clock, CycleOutcome, IntakeController, Presenter,
};
pub use error::{FailureKind, FailureNotice, IntakeError, RemovalFailure};
pub use state::{Preview, UiState};
pub use types::{InputImage, InputSource, ProcessedImage, Progress};
