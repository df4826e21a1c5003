//! Bridges controller state into Dioxus signals.

use bgcut_intake::{Presenter, UiState};
use dioxus::prelude::*;

/// A [`Presenter`] that writes every state into a signal, which the
/// result view renders.
#[derive(Clone, Copy)]
pub struct SignalPresenter {
    state: Signal<UiState>,
}

impl SignalPresenter {
    /// Present into `state`.
    #[must_use]
    pub const fn new(state: Signal<UiState>) -> Self {
        Self { state }
    }
}

impl Presenter for SignalPresenter {
    fn present(&self, state: UiState) {
        let mut signal = self.state;
        signal.set(state);
    }
}
