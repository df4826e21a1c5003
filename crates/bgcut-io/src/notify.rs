//! User notifications and console diagnostics.
//!
//! Failures are surfaced through a blocking `window.alert` and logged
//! to the browser console. There is no toast queue.

use bgcut_intake::{FailureNotice, IntakeError};

/// Log an error to the browser console.
pub fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

/// Log a warning to the browser console.
pub fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// Log an informational message to the browser console.
pub fn log_info(message: &str) {
    web_sys::console::info_1(&message.into());
}

/// Show a blocking alert.
///
/// Falls back to a console error when there is no window.
pub fn alert(message: &str) {
    let shown = web_sys::window().is_some_and(|w| w.alert_with_message(message).is_ok());
    if !shown {
        log_error(message);
    }
}

/// Log `err` and alert the user with its notice.
pub fn report(err: &IntakeError) {
    log_error(&format!("bgcut: {err}"));
    alert(&FailureNotice::from_error(err).message());
}
