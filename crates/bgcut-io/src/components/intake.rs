//! The image intake screen.
//!
//! Owns the [`IntakeController`] and feeds it from three sources: the
//! drop zone (picker and drag-and-drop) and page-wide paste events.
//! Every image goes through one coroutine, which runs cycles
//! concurrently so that a newer image can supersede one still in
//! flight.

use std::rc::Rc;

use bgcut_intake::{
    CycleOutcome, InputImage, InputSource, IntakeConfig, IntakeController, UiState,
};
use dioxus::prelude::*;
use futures_util::StreamExt;

use super::{DropZone, ResultView};
use crate::capability::ImglyRemover;
use crate::presenter::SignalPresenter;
use crate::{clipboard, dom, notify};

type Controller = IntakeController<ImglyRemover, SignalPresenter>;

/// Props for the [`IntakeView`] component.
#[derive(Props, Clone, PartialEq)]
pub struct IntakeViewProps {
    /// The detected background-removal binding.
    remover: ImglyRemover,
    /// Active configuration.
    config: IntakeConfig,
}

/// Drop zone plus result view, wired to a controller.
#[component]
pub fn IntakeView(props: IntakeViewProps) -> Element {
    let state = use_signal(UiState::default);

    let controller: Rc<Controller> = use_hook(|| {
        Rc::new(IntakeController::new(
            props.remover.clone(),
            SignalPresenter::new(state),
            props.config.clone(),
        ))
    });

    let intake = use_coroutine(move |rx: UnboundedReceiver<InputImage>| {
        let controller = Rc::clone(&controller);
        async move {
            rx.for_each_concurrent(None, |image| {
                let controller = Rc::clone(&controller);
                async move {
                    let name = image.name.clone();
                    let source = image.source;
                    let outcome = controller.process_image(image).await;
                    log_outcome(&name, source, &outcome);
                }
            })
            .await;
        }
    });

    // Page-wide listeners, installed once.
    use_hook(move || {
        if let Err(e) = dom::suppress_default_drag() {
            notify::log_warn(&format!("bgcut: drag suppression unavailable: {e}"));
        }
        let tx = intake.tx();
        let listening = clipboard::listen_for_pastes(move |file| {
            let tx = tx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let delivered = clipboard::read_pasted(&file)
                    .await
                    .and_then(|image| clipboard::deliver(&tx, image));
                match delivered {
                    Ok(()) => {}
                    Err(clipboard::ClipboardError::Closed) => {
                        notify::log_warn("bgcut: paste dropped, intake view is gone");
                    }
                    Err(e) => notify::log_error(&format!("bgcut: failed to read paste: {e}")),
                }
            });
        });
        if let Err(e) = listening {
            notify::log_warn(&format!("bgcut: paste support unavailable: {e}"));
        }
    });

    rsx! {
        div { class: "intake",
            DropZone {
                on_image: move |image: InputImage| intake.send(image),
                on_reject: move |err| notify::report(&err),
            }
            ResultView { state: state() }
        }
    }
}

/// Console-log a settled cycle and alert the user on failure.
fn log_outcome(name: &str, source: InputSource, outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::Rejected(err) => notify::report(err),
        CycleOutcome::Failed { error, notice } => {
            notify::log_error(&format!("bgcut: {name} ({source}): {error}"));
            notify::alert(&notice.message());
        }
        CycleOutcome::Completed(preview) => notify::log_info(&format!(
            "bgcut: {name} ({source}) ready as {}",
            preview.download_name
        )),
        CycleOutcome::Superseded => {
            notify::log_info(&format!("bgcut: {name} ({source}) superseded by a newer image"));
        }
    }
}
