//! Drop zone with drag-and-drop and click-to-browse.

use bgcut_intake::{InputImage, InputSource, IntakeError, accept};
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;

use crate::{dom, notify};

/// DOM id of the hidden file input.
pub const FILE_INPUT_ID: &str = "bgcut-file-input";

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Called with the first file once it passes the type check and its
    /// bytes are read.
    on_image: EventHandler<InputImage>,
    /// Called when the first file is not an image.
    on_reject: EventHandler<IntakeError>,
}

/// A click-or-drop target for images.
///
/// The whole zone is a `<label>` for a hidden file input, so clicking
/// anywhere opens the picker. Only the first of several files is used.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut read_error = use_signal(|| Option::<String>::None);

    // Shared by the picker and drop paths: check the first file by its
    // reported type, then read it and forward it.
    let process_files = move |files: Vec<FileData>, source: InputSource| async move {
        let listed: Vec<(String, Option<String>)> = files
            .iter()
            .map(|f| (f.name(), f.content_type()))
            .collect();
        let mime = match accept::select_file(
            listed
                .iter()
                .map(|(name, mime)| (name.as_str(), mime.as_deref())),
        ) {
            Ok(Some(mime)) => mime,
            Ok(None) => return,
            Err(e) => {
                props.on_reject.call(e);
                return;
            }
        };
        let (Some(file), Some((name, _))) = (files.first(), listed.first()) else {
            return;
        };
        match file.read_bytes().await {
            Ok(bytes) => {
                read_error.set(None);
                props
                    .on_image
                    .call(InputImage::new(bytes.to_vec(), name.clone(), mime, source));
            }
            Err(e) => {
                notify::log_error(&format!("bgcut: failed to read {name}: {e}"));
                read_error.set(Some(format!("Failed to read {name}: {e}")));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files(), InputSource::FilePicker).await;
        dom::reset_file_input(FILE_INPUT_ID);
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files(), InputSource::DragDrop).await;
    };

    let border_class = if dragging() {
        "border-accent bg-active"
    } else {
        "border-muted bg-surface"
    };

    rsx! {
        label {
            r#for: FILE_INPUT_ID,
            class: "drop-zone {border_class}",
            ondragenter: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                id: FILE_INPUT_ID,
                r#type: "file",
                accept: accept::ACCEPT_ATTRIBUTE,
                class: "hidden",
                onchange: handle_files,
            }

            Icon { width: 40, height: 40, icon: LdUpload }

            p { class: "drop-zone-title",
                "Drop an image here, or click to choose one"
            }
            p { class: "drop-zone-hint",
                "You can also paste an image anywhere on the page"
            }

            if let Some(ref err) = read_error() {
                p { class: "text-error", "{err}" }
            }
        }
    }
}
