//! Input acceptance rules shared by all three input channels.
//!
//! The file picker and drag-and-drop both deliver a list of files of
//! which only the first is used; its MIME type is the one the browser
//! reported, or is derived from the filename extension when the browser
//! reported none. Clipboard pastes deliver typed items; the first
//! item with an image MIME type wins and anything else is ignored.

use crate::error::IntakeError;
use crate::types::{InputImage, InputSource};

/// Value for the file input's `accept` attribute.
pub const ACCEPT_ATTRIBUTE: &str = "image/*";

/// MIME type assumed for files whose extension is not recognized.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Known image extensions and their MIME types.
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("svg", "image/svg+xml"),
];

/// Derive a MIME type from a filename extension (case-insensitive).
///
/// Returns [`UNKNOWN_MIME`] when the name has no extension or the
/// extension is not a known image type.
#[must_use]
pub fn mime_for_filename(name: &str) -> &'static str {
    name.rsplit_once('.')
        .and_then(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        })
        .map_or(UNKNOWN_MIME, |&(_, mime)| mime)
}

/// Whether `mime` names an image type (`image/...`).
#[must_use]
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Check a file by name and MIME type before its bytes are read.
///
/// # Errors
///
/// Returns [`IntakeError::UnsupportedInputType`] when `mime` is not an
/// image type.
pub fn check_file(name: &str, mime: &str) -> Result<(), IntakeError> {
    if is_image_mime(mime) {
        Ok(())
    } else {
        Err(IntakeError::UnsupportedInputType {
            name: name.to_owned(),
            mime: mime.to_owned(),
        })
    }
}

/// Validate a fully read input image.
///
/// # Errors
///
/// Returns [`IntakeError::UnsupportedInputType`] for non-image MIME
/// types and [`IntakeError::EmptyInput`] when there are no bytes.
pub fn validate(image: &InputImage) -> Result<(), IntakeError> {
    check_file(&image.name, &image.mime)?;
    if image.bytes.is_empty() {
        return Err(IntakeError::EmptyInput);
    }
    Ok(())
}

/// MIME type for a picked or dropped file.
///
/// The browser-reported type wins; the filename extension is consulted
/// only when the browser reported nothing.
#[must_use]
pub fn resolve_mime(name: &str, reported: Option<&str>) -> String {
    match reported.map(str::trim) {
        Some(mime) if !mime.is_empty() => mime.to_owned(),
        _ => mime_for_filename(name).to_owned(),
    }
}

/// Pick the file to process from a picker or drop list: the first one.
/// Each entry is a filename with its browser-reported MIME type, if
/// any. Returns the resolved MIME type of the first file.
///
/// Returns `None` for an empty list (e.g. a cancelled picker), which is
/// not an error.
///
/// # Errors
///
/// Returns [`IntakeError::UnsupportedInputType`] when the first file's
/// type is not an image type. Later files are never considered.
pub fn select_file<'a, I>(files: I) -> Result<Option<String>, IntakeError>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let Some((name, reported)) = files.into_iter().next() else {
        return Ok(None);
    };
    let mime = resolve_mime(name, reported);
    check_file(name, &mime)?;
    Ok(Some(mime))
}

/// Pick the clipboard item to process: the first one whose MIME type is
/// an image type.
///
/// Returns `None` when no item qualifies; a non-image paste is ignored
/// without any notice.
#[must_use]
pub fn select_clipboard_item<'a, I>(mimes: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    mimes.into_iter().position(is_image_mime)
}

/// Build the input for a pasted clipboard item.
#[must_use]
pub fn pasted_image(bytes: Vec<u8>, name: &str, mime: &str) -> InputImage {
    InputImage::new(bytes, pasted_name(name, mime), mime, InputSource::Clipboard)
}

/// Filename given to a pasted image that arrives without one.
#[must_use]
pub fn pasted_name(name: &str, mime: &str) -> String {
    if !name.trim().is_empty() {
        return name.to_owned();
    }
    let ext = mime
        .split_once('/')
        .map(|(_, sub)| sub.split(['+', ';']).next().unwrap_or(sub))
        .filter(|sub| !sub.is_empty())
        .unwrap_or("png");
    format!("image.{ext}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_filename("photo.jpg"), "image/jpeg");
        assert_eq!(mime_for_filename("PHOTO.JPEG"), "image/jpeg");
        assert_eq!(mime_for_filename("shot.final.PNG"), "image/png");
        assert_eq!(mime_for_filename("icon.svg"), "image/svg+xml");
    }

    #[test]
    fn unknown_or_missing_extension() {
        assert_eq!(mime_for_filename("notes.txt"), UNKNOWN_MIME);
        assert_eq!(mime_for_filename("README"), UNKNOWN_MIME);
        assert_eq!(mime_for_filename("archive.tar.gz"), UNKNOWN_MIME);
    }

    #[test]
    fn image_mime_prefix() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("Image/HEIC"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime("img"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn check_rejects_non_images() {
        let err = check_file("report.pdf", "application/pdf").unwrap_err();
        assert_eq!(
            err,
            IntakeError::UnsupportedInputType {
                name: "report.pdf".into(),
                mime: "application/pdf".into(),
            }
        );
    }

    #[test]
    fn validate_rejects_empty_bytes() {
        let img = InputImage::new(vec![], "a.png", "image/png", InputSource::FilePicker);
        assert_eq!(validate(&img), Err(IntakeError::EmptyInput));
    }

    #[test]
    fn validate_accepts_image() {
        let img = InputImage::new(vec![1, 2, 3], "a.png", "image/png", InputSource::DragDrop);
        assert!(validate(&img).is_ok());
    }

    #[test]
    fn select_file_uses_first_only() {
        let picked = select_file([("cat.webp", Some("image/webp")), ("notes.txt", None)]).unwrap();
        assert_eq!(picked.as_deref(), Some("image/webp"));
    }

    #[test]
    fn select_file_rejects_first_non_image_even_if_later_is_image() {
        let err = select_file([("notes.txt", Some("text/plain")), ("cat.png", Some("image/png"))])
            .unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedInputType { ref name, .. } if name == "notes.txt"));
    }

    #[test]
    fn select_file_empty_list() {
        assert_eq!(select_file(std::iter::empty()).unwrap(), None);
    }

    #[test]
    fn reported_type_beats_extension() {
        let picked = select_file([("screenshot", Some("image/png"))]).unwrap();
        assert_eq!(picked.as_deref(), Some("image/png"));

        let picked = select_file([("photo.heic", Some("image/heic"))]).unwrap();
        assert_eq!(picked.as_deref(), Some("image/heic"));
    }

    #[test]
    fn misnamed_text_file_is_rejected() {
        let err = select_file([("notes.png", Some("text/plain"))]).unwrap_err();
        assert_eq!(
            err,
            IntakeError::UnsupportedInputType {
                name: "notes.png".into(),
                mime: "text/plain".into(),
            }
        );
    }

    #[test]
    fn extension_used_only_without_reported_type() {
        assert_eq!(resolve_mime("cat.png", None), "image/png");
        assert_eq!(resolve_mime("cat.png", Some("  ")), "image/png");
        assert_eq!(resolve_mime("scan", None), UNKNOWN_MIME);
        assert!(select_file([("scan", None)]).is_err());
    }

    #[test]
    fn clipboard_first_image_item() {
        let mimes = ["text/plain", "text/html", "image/png", "image/jpeg"];
        assert_eq!(select_clipboard_item(mimes), Some(2));
    }

    #[test]
    fn clipboard_without_image_is_ignored() {
        assert_eq!(select_clipboard_item(["text/plain", "text/html"]), None);
        assert_eq!(select_clipboard_item(std::iter::empty()), None);
    }

    #[test]
    fn pasted_name_keeps_real_names() {
        assert_eq!(pasted_name("screenshot.png", "image/png"), "screenshot.png");
    }

    #[test]
    fn pasted_image_is_tagged_as_clipboard() {
        let img = pasted_image(vec![1], "", "image/png");
        assert_eq!(img.name, "image.png");
        assert_eq!(img.mime, "image/png");
        assert_eq!(img.source, InputSource::Clipboard);
    }

    #[test]
    fn pasted_name_fallback_from_mime() {
        assert_eq!(pasted_name("", "image/jpeg"), "image.jpeg");
        assert_eq!(pasted_name(" ", "image/svg+xml"), "image.svg");
        assert_eq!(pasted_name("", "image/"), "image.png");
    }
}
