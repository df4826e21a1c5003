//! The image intake controller.
//!
//! [`IntakeController::process_image`] runs one processing cycle:
//!
//! 1. Start a new generation and present [`UiState::Loading`], which
//!    hides any previous preview and download link.
//! 2. Hand the image to the [`BackgroundRemover`] with the configured
//!    [`OutputConfig`](crate::OutputConfig).
//! 3. On success, verify the output encoding, build the download name
//!    and present [`UiState::PreviewReady`].
//! 4. On failure, present [`UiState::Error`] with a [`FailureNotice`].
//!
//! Cycles may overlap (a second image dropped while the first is still
//! being processed). Each cycle captures its generation at start; when
//! it settles after a newer cycle has started, its result is discarded
//! and [`CycleOutcome::Superseded`] is returned without touching the UI.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::accept;
use crate::config::{IntakeConfig, OutputConfig, OutputFormat};
use crate::error::{FailureNotice, IntakeError, RemovalFailure};
use crate::naming;
use crate::state::{Preview, UiState};
use crate::types::{InputImage, ProcessedImage, Progress};

/// Source of "now" for download timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// The external background-removal capability.
///
/// Implemented over the page's JavaScript library in `bgcut-io`.
/// Implementations resolve with the encoded output bytes, or reject
/// with a [`RemovalFailure`]. No retries, no timeout.
#[allow(async_fn_in_trait)] // single-threaded WASM; futures are never sent
pub trait BackgroundRemover {
    /// Remove the background from `image`.
    ///
    /// `progress` may be called any number of times while the call is
    /// in flight. It must stay callable after the call resolves; late
    /// reports are ignored.
    async fn remove_background(
        &self,
        image: &InputImage,
        config: &OutputConfig,
        progress: Rc<dyn Fn(Progress)>,
    ) -> Result<Vec<u8>, RemovalFailure>;
}

/// Receives every state the controller wants shown.
pub trait Presenter {
    /// Show `state`, replacing whatever was shown before.
    fn present(&self, state: UiState);
}

impl<F: Fn(UiState)> Presenter for F {
    fn present(&self, state: UiState) {
        self(state);
    }
}

/// Result of probing for the capability at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability<R> {
    /// The capability is present; the feature is enabled.
    Available(R),
    /// The capability is missing; the feature stays disabled for the
    /// lifetime of the page.
    Unavailable(String),
}

impl<R> Availability<R> {
    /// Convert to a `Result`, mapping absence to
    /// [`IntakeError::MissingCapability`].
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingCapability`] when unavailable.
    pub fn into_result(self) -> Result<R, IntakeError> {
        match self {
            Self::Available(remover) => Ok(remover),
            Self::Unavailable(reason) => Err(IntakeError::MissingCapability(reason)),
        }
    }

    /// Whether the capability is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// How one call to [`IntakeController::process_image`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The input was rejected before a cycle started. Nothing was
    /// presented; the caller should notify the user.
    Rejected(IntakeError),
    /// A preview was presented.
    Completed(Preview),
    /// An error was presented.
    Failed {
        /// The underlying error.
        error: IntakeError,
        /// What the user was shown.
        notice: FailureNotice,
    },
    /// A newer cycle started before this one settled; its result was
    /// dropped.
    Superseded,
}

/// Drives processing cycles and reports state through a [`Presenter`].
pub struct IntakeController<R, P> {
    remover: R,
    presenter: Rc<P>,
    config: IntakeConfig,
    clock: Clock,
    generation: Rc<Cell<u64>>,
}

impl<R, P> IntakeController<R, P>
where
    R: BackgroundRemover,
    P: Presenter + 'static,
{
    /// Create a controller. Nothing is presented until the first cycle.
    pub fn new(remover: R, presenter: P, config: IntakeConfig) -> Self {
        Self {
            remover,
            presenter: Rc::new(presenter),
            config,
            clock: Utc::now,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Replace the clock used for download timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The active configuration.
    pub const fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Generation of the most recently started cycle (0 before the
    /// first).
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Check an input without starting a cycle.
    ///
    /// # Errors
    ///
    /// See [`accept::validate`].
    pub fn accept(&self, image: &InputImage) -> Result<(), IntakeError> {
        accept::validate(image)
    }

    /// Run one processing cycle for `image`.
    ///
    /// Invalid inputs are returned as [`CycleOutcome::Rejected`] with no
    /// state change.
    pub async fn process_image(&self, image: InputImage) -> CycleOutcome {
        if let Err(err) = self.accept(&image) {
            return CycleOutcome::Rejected(err);
        }

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.presenter.present(UiState::LOADING);

        let settled = Rc::new(Cell::new(false));
        let progress = self.progress_sink(generation, Rc::clone(&settled));

        let result = self
            .remover
            .remove_background(&image, &self.config.removal, progress)
            .await;
        settled.set(true);

        if self.generation.get() != generation {
            return CycleOutcome::Superseded;
        }

        let outcome = result
            .map_err(IntakeError::from)
            .and_then(|bytes| verify_output(bytes, self.config.output_format()));

        match outcome {
            Ok(processed) => {
                let preview = Preview {
                    generation,
                    image: Rc::new(processed),
                    download_name: naming::download_filename(
                        &image.name,
                        (self.clock)(),
                        &self.config,
                    ),
                };
                self.presenter
                    .present(UiState::PreviewReady(preview.clone()));
                CycleOutcome::Completed(preview)
            }
            Err(error) => {
                let notice = FailureNotice::from_error(&error);
                self.presenter.present(UiState::Error(notice.clone()));
                CycleOutcome::Failed { error, notice }
            }
        }
    }

    /// Progress callback for one cycle. Reports are dropped once the
    /// cycle has settled or a newer one has started.
    fn progress_sink(&self, generation: u64, settled: Rc<Cell<bool>>) -> Rc<dyn Fn(Progress)> {
        let presenter = Rc::clone(&self.presenter);
        let current = Rc::clone(&self.generation);
        Rc::new(move |progress: Progress| {
            if !settled.get() && current.get() == generation {
                presenter.present(UiState::Loading {
                    progress: Some(progress),
                });
            }
        })
    }
}

/// Check that `bytes` carry `expected` by their magic bytes.
///
/// # Errors
///
/// Returns [`IntakeError::UnexpectedOutput`] when the bytes are some
/// other format or are not recognizable at all.
pub fn verify_output(bytes: Vec<u8>, expected: OutputFormat) -> Result<ProcessedImage, IntakeError> {
    match image::guess_format(&bytes) {
        Ok(found) if found == expected.image_format() => Ok(ProcessedImage {
            bytes,
            format: expected,
        }),
        Ok(found) => Err(IntakeError::UnexpectedOutput {
            expected,
            actual: found.to_mime_type().to_owned(),
        }),
        Err(_) => Err(IntakeError::UnexpectedOutput {
            expected,
            actual: String::from("unrecognized data"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn verify_accepts_matching_format() {
        let out = verify_output(PNG_MAGIC.to_vec(), OutputFormat::Png);
        assert!(matches!(out, Ok(ref img) if img.format == OutputFormat::Png));
    }

    #[test]
    fn verify_rejects_other_format() {
        let out = verify_output(JPEG_MAGIC.to_vec(), OutputFormat::Png);
        assert_eq!(
            out,
            Err(IntakeError::UnexpectedOutput {
                expected: OutputFormat::Png,
                actual: "image/jpeg".into(),
            })
        );
    }

    #[test]
    fn verify_rejects_garbage_and_empty() {
        assert!(matches!(
            verify_output(b"<html>".to_vec(), OutputFormat::Png),
            Err(IntakeError::UnexpectedOutput { ref actual, .. }) if actual == "unrecognized data"
        ));
        assert!(verify_output(Vec::new(), OutputFormat::Png).is_err());
    }

    #[test]
    fn availability_into_result() {
        let available: Availability<u8> = Availability::Available(7);
        assert!(available.is_available());
        assert_eq!(available.into_result(), Ok(7));

        let missing: Availability<u8> = Availability::Unavailable("no global".into());
        assert!(!missing.is_available());
        assert_eq!(
            missing.into_result(),
            Err(IntakeError::MissingCapability("no global".into()))
        );
    }

    #[test]
    fn closures_are_presenters() {
        let seen = Rc::new(Cell::new(false));
        let seen_clone = Rc::clone(&seen);
        let presenter = move |state: UiState| seen_clone.set(state.is_loading());
        presenter.present(UiState::LOADING);
        assert!(seen.get());
    }
}
