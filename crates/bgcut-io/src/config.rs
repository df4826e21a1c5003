//! Page-level configuration.
//!
//! A page may define `window.bgcutConfig` (any subset of
//! [`IntakeConfig`]'s camelCase fields) before the app starts:
//!
//! ```html
//! <script>
//!   window.bgcutConfig = { removal: { output: { format: "image/webp", quality: 0.9 } } };
//! </script>
//! ```
//!
//! A missing object yields the defaults; a malformed one yields the
//! defaults plus a console warning.

use bgcut_intake::{IntakeConfig, IntakeError};
use wasm_bindgen::JsValue;

use crate::notify;

/// Name of the optional configuration global.
pub const CONFIG_GLOBAL: &str = "bgcutConfig";

/// Errors that can occur while reading the page configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),

    /// The object does not match the configuration schema.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but breaks an invariant.
    #[error(transparent)]
    Invalid(#[from] IntakeError),
}

impl From<JsValue> for ConfigError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Load the configuration, falling back to defaults.
#[must_use]
pub fn load() -> IntakeConfig {
    match read() {
        Ok(Some(config)) => config,
        Ok(None) => IntakeConfig::default(),
        Err(e) => {
            notify::log_warn(&format!(
                "bgcut: ignoring window.{CONFIG_GLOBAL}: {e}; using defaults"
            ));
            IntakeConfig::default()
        }
    }
}

/// Read and validate `window.bgcutConfig`, if present.
///
/// # Errors
///
/// Returns [`ConfigError`] if the object cannot be serialized, does not
/// match the schema, or fails validation.
pub fn read() -> Result<Option<IntakeConfig>, ConfigError> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let json = js_sys::JSON::stringify(&value)?
        .as_string()
        .ok_or_else(|| ConfigError::JsError("JSON.stringify did not return a string".into()))?;
    let config = parse(&json)?;
    Ok(Some(config))
}

/// Parse and validate a configuration document.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
pub fn parse(json: &str) -> Result<IntakeConfig, ConfigError> {
    let config: IntakeConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}
