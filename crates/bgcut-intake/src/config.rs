//! Configuration for the intake controller and the capability call.
//!
//! [`OutputConfig`] serializes (camelCase) to exactly the options object
//! the background-removal capability expects as its second argument:
//!
//! ```json
//! { "debug": false, "output": { "format": "image/png", "type": "foreground" } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Encoding requested from (and verified on) the capability's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless with alpha. The only format that keeps transparency in
    /// every browser.
    #[default]
    #[serde(rename = "image/png")]
    Png,
    /// Lossy, no alpha channel.
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// Lossy or lossless with alpha.
    #[serde(rename = "image/webp")]
    Webp,
}

impl OutputFormat {
    /// All supported formats.
    pub const ALL: [Self; 3] = [Self::Png, Self::Jpeg, Self::Webp];

    /// MIME type string, as passed to the capability.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// File extension used for the download name (no leading dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// Look up a format by MIME type (case-insensitive).
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.mime().eq_ignore_ascii_case(mime.trim()))
    }

    /// Whether `output.quality` has any effect for this format.
    #[must_use]
    pub const fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg | Self::Webp)
    }

    pub(crate) const fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Webp => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// What the capability should render into the output image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// The subject with a transparent background.
    #[default]
    Foreground,
    /// The background with the subject cut out.
    Background,
    /// The segmentation mask itself.
    Mask,
}

/// The `output` section of the capability options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Requested encoding.
    #[serde(default)]
    pub format: OutputFormat,

    /// Encoder quality in `0.0..=1.0`. Only meaningful for lossy formats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,

    /// What to render.
    #[serde(default, rename = "type")]
    pub kind: OutputKind,
}

/// Options object handed to the capability on every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Where the capability fetches its model assets from. `None` lets
    /// the library resolve its own CDN path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Ask the library for verbose console output.
    #[serde(default)]
    pub debug: bool,

    /// Output encoding options.
    #[serde(default)]
    pub output: OutputOptions,
}

/// Top-level configuration for the intake controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntakeConfig {
    /// Options forwarded to the capability.
    pub removal: OutputConfig,

    /// Leading component of download filenames.
    pub filename_prefix: String,

    /// Base name used when the input filename has none.
    pub fallback_base_name: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            removal: OutputConfig::default(),
            filename_prefix: String::from("bg_removed"),
            fallback_base_name: String::from("image"),
        }
    }
}

impl IntakeConfig {
    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidConfig`] if `quality` is outside
    /// `0.0..=1.0` or either name component is empty.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if let Some(q) = self.removal.output.quality
            && !(0.0..=1.0).contains(&q)
        {
            return Err(IntakeError::InvalidConfig(format!(
                "output quality must be within 0.0..=1.0, got {q}"
            )));
        }
        if self.filename_prefix.trim().is_empty() {
            return Err(IntakeError::InvalidConfig(
                "filename prefix must not be empty".into(),
            ));
        }
        if self.fallback_base_name.trim().is_empty() {
            return Err(IntakeError::InvalidConfig(
                "fallback base name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The output format requested from the capability.
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        self.removal.output.format
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_png_foreground() {
        let config = IntakeConfig::default();
        assert_eq!(config.output_format(), OutputFormat::Png);
        assert_eq!(config.removal.output.kind, OutputKind::Foreground);
        assert_eq!(config.removal.output.quality, None);
        assert_eq!(config.removal.public_path, None);
        assert_eq!(config.filename_prefix, "bg_removed");
        assert_eq!(config.fallback_base_name, "image");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn output_config_matches_capability_shape() {
        let json = serde_json::to_value(OutputConfig::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "debug": false,
                "output": { "format": "image/png", "type": "foreground" }
            })
        );
    }

    #[test]
    fn output_config_includes_optional_fields_when_set() {
        let config = OutputConfig {
            public_path: Some("https://static.example.com/models/".into()),
            debug: true,
            output: OutputOptions {
                format: OutputFormat::Webp,
                quality: Some(0.5),
                kind: OutputKind::Mask,
            },
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["publicPath"], "https://static.example.com/models/");
        assert_eq!(json["output"]["format"], "image/webp");
        assert_eq!(json["output"]["quality"], 0.5);
        assert_eq!(json["output"]["type"], "mask");
    }

    #[test]
    fn partial_intake_config_fills_defaults() {
        let config: IntakeConfig =
            serde_json::from_str(r#"{ "removal": { "output": { "format": "image/jpeg" } } }"#)
                .unwrap();
        assert_eq!(config.output_format(), OutputFormat::Jpeg);
        assert_eq!(config.filename_prefix, "bg_removed");
        assert!(!config.removal.debug);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result: Result<IntakeConfig, _> =
            serde_json::from_str(r#"{ "removal": { "output": { "format": "image/gif" } } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn quality_out_of_range_is_invalid() {
        let mut config = IntakeConfig::default();
        config.removal.output.quality = Some(1.5);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, IntakeError::InvalidConfig(ref m) if m.contains("1.5")));
    }

    #[test]
    fn blank_prefix_is_invalid() {
        let config = IntakeConfig {
            filename_prefix: "  ".into(),
            ..IntakeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn format_lookup_by_mime() {
        assert_eq!(OutputFormat::from_mime("IMAGE/PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_mime("image/webp"), Some(OutputFormat::Webp));
        assert_eq!(OutputFormat::from_mime("image/gif"), None);
    }

    #[test]
    fn format_extensions() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(!OutputFormat::Png.is_lossy());
    }
}
