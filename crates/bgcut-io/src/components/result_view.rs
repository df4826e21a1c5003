//! Loading indicator, error panel, preview, and download link.
//!
//! Object URLs follow the current preview: both are created when a new
//! preview arrives and dropped (revoking them) as soon as the view
//! leaves [`UiState::PreviewReady`], which is what hides the previous
//! download link when the next cycle starts. The display URL is also
//! revoked early, once the `<img>` has loaded or failed.

use std::rc::Rc;

use bgcut_intake::UiState;
use dioxus::prelude::*;

use crate::blob_url::PreviewUrls;
use crate::notify;

/// Props for the [`ResultView`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultViewProps {
    /// The state last presented by the controller.
    state: UiState,
}

/// Renders whatever the controller last presented.
#[component]
pub fn ResultView(props: ResultViewProps) -> Element {
    let mut urls: Signal<Option<Rc<PreviewUrls>>> = use_signal(|| None);

    // Revoke outstanding URLs when the component is destroyed.
    use_drop(move || {
        if let Some(ref current) = *urls.peek() {
            current.display.revoke();
            current.download.revoke();
        }
    });

    let preview = props.state.preview();
    let wanted = preview.map(|p| p.generation);
    let held = urls.peek().as_ref().map(|u| u.generation);
    if held != wanted {
        // Replacing the signal value drops the previous URLs.
        let next = preview.and_then(|p| match PreviewUrls::for_preview(p) {
            Ok(created) => Some(Rc::new(created)),
            Err(e) => {
                notify::log_error(&format!("bgcut: failed to create preview URLs: {e}"));
                None
            }
        });
        urls.set(next);
    }

    match &props.state {
        UiState::Idle => rsx! {
            p { class: "result-hint",
                "The result will appear here."
            }
        },

        UiState::Loading { progress } => {
            let percent = progress.as_ref().and_then(bgcut_intake::Progress::percent);
            rsx! {
                div { class: "loading", role: "status",
                    div { class: "spinner" }
                    p { class: "loading-text animate-pulse",
                        if let Some(pct) = percent {
                            "Removing background... {pct}%"
                        } else {
                            "Removing background..."
                        }
                    }
                }
            }
        }

        UiState::Error(notice) => {
            let message = notice.message();
            rsx! {
                p { class: "text-error result-error", role: "alert", "{message}" }
            }
        }

        UiState::PreviewReady(preview) => {
            let current = urls.peek().clone();
            let Some(current) = current else {
                return rsx! {
                    p { class: "text-error", "The processed image could not be displayed." }
                };
            };
            let display_url = current.display.as_str().to_owned();
            let download_url = current.download.as_str().to_owned();
            let download_name = preview.download_name.clone();
            let on_load = Rc::clone(&current);
            let on_error = current;

            rsx! {
                div { class: "result",
                    img {
                        src: "{display_url}",
                        class: "result-image",
                        alt: "Image with background removed",
                        onload: move |_| on_load.display.revoke(),
                        onerror: move |_| on_error.display.revoke(),
                    }
                    a {
                        class: "download-link",
                        href: "{download_url}",
                        download: "{download_name}",
                        "Download {download_name}"
                    }
                }
            }
        }
    }
}
