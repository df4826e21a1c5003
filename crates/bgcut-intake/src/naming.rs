//! Download filename construction.
//!
//! Names follow `<prefix>_<base>_<timestamp>.<ext>`, e.g.
//! `bg_removed_photo_20240501T120000.png`, where the timestamp is the
//! UTC time of the successful run in compact ISO-8601 form (seconds
//! precision, no separators).

use chrono::{DateTime, Utc};

use crate::config::IntakeConfig;

/// `strftime` pattern for the compact timestamp.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Strip the last extension from a filename.
///
/// A name without a dot is returned whole. Returns `None` when nothing
/// is left (empty names, dotfiles such as `.png`).
#[must_use]
pub fn base_name(name: &str) -> Option<&str> {
    let base = name.rsplit_once('.').map_or(name, |(base, _)| base);
    (!base.trim().is_empty()).then_some(base)
}

/// Format `at` as a compact ISO-8601 UTC timestamp (`20240501T120000`).
#[must_use]
pub fn compact_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Build the download filename for an image originally named `name`,
/// processed at `at`.
#[must_use]
pub fn download_filename(name: &str, at: DateTime<Utc>, config: &IntakeConfig) -> String {
    let base = base_name(name).unwrap_or(&config.fallback_base_name);
    format!(
        "{}_{}_{}.{}",
        config.filename_prefix,
        base,
        compact_timestamp(at),
        config.output_format().extension(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::OutputFormat;

    fn may_day_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn strips_last_extension_only() {
        assert_eq!(base_name("photo.jpg"), Some("photo"));
        assert_eq!(base_name("holiday.2024.png"), Some("holiday.2024"));
    }

    #[test]
    fn name_without_dot_is_kept() {
        assert_eq!(base_name("scan"), Some("scan"));
    }

    #[test]
    fn empty_bases_are_none() {
        assert_eq!(base_name(""), None);
        assert_eq!(base_name(".png"), None);
    }

    #[test]
    fn timestamp_has_no_separators() {
        assert_eq!(compact_timestamp(may_day_noon()), "20240501T120000");
    }

    #[test]
    fn timestamp_drops_subseconds() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 58).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(compact_timestamp(at), "20231231T235958");
    }

    #[test]
    fn photo_jpg_example() {
        let name = download_filename("photo.jpg", may_day_noon(), &IntakeConfig::default());
        assert_eq!(name, "bg_removed_photo_20240501T120000.png");
    }

    #[test]
    fn fallback_base_for_dotfile() {
        let name = download_filename(".jpg", may_day_noon(), &IntakeConfig::default());
        assert_eq!(name, "bg_removed_image_20240501T120000.png");
    }

    #[test]
    fn extension_follows_output_format() {
        let mut config = IntakeConfig::default();
        config.removal.output.format = OutputFormat::Webp;
        config.filename_prefix = "cutout".into();
        let name = download_filename("cat.png", may_day_noon(), &config);
        assert_eq!(name, "cutout_cat_20240501T120000.webp");
    }
}
