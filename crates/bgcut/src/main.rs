use bgcut_intake::error::CAPABILITY_MISSING;
use bgcut_intake::{Availability, IntakeConfig};
use bgcut_io::{CapabilityUnavailable, ImglyRemover, IntakeView, capability, config, notify};
use dioxus::prelude::*;

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Reads the page configuration and probes for the background-removal
/// library once, then shows either the intake view or a static notice
/// that the feature is unavailable.
fn app() -> Element {
    let config: IntakeConfig = use_hook(config::load);

    let availability: Availability<ImglyRemover> = use_hook(|| {
        let probed = capability::detect();
        if let Availability::Unavailable(ref reason) = probed {
            notify::log_error(&format!("bgcut: {reason}"));
            notify::alert(CAPABILITY_MISSING);
        }
        probed
    });

    let body = match availability {
        Availability::Available(remover) => rsx! {
            IntakeView { remover, config }
        },
        Availability::Unavailable(reason) => rsx! {
            CapabilityUnavailable { reason }
        },
    };

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { class: "title", "bgcut" }
                p { class: "text-muted text-sm",
                    "Remove image backgrounds in your browser. Nothing is uploaded."
                }
            }

            main { class: "page-main", {body} }
        }
    }
}
