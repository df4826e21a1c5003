//! Static notice shown when the background-removal library is missing.

use bgcut_intake::error::CAPABILITY_MISSING;
use dioxus::prelude::*;

/// Replaces the intake UI when the library never loaded.
///
/// `reason` is the probe's diagnostic, shown in small print.
#[component]
pub fn CapabilityUnavailable(reason: String) -> Element {
    rsx! {
        div { class: "unavailable", role: "alert",
            p { class: "text-error", "{CAPABILITY_MISSING}" }
            p { class: "text-muted text-sm", "{reason}" }
        }
    }
}
