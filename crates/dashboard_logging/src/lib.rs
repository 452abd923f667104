#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! This crate provides the `dashboard_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is prefixed
//! with the current session label so that output from the effect worker thread
//! and the hosting shell can be told apart per user.

use std::sync::RwLock;

const ANONYMOUS_LABEL: &str = "anonymous";

/// Process-wide session label. Global rather than thread-local because effects
/// run on a separate worker thread.
static SESSION_LABEL: RwLock<Option<String>> = RwLock::new(None);

/// Sets the label prefixed to every `dashboard_*` log line.
/// The hosting shell calls this once the user profile is known.
pub fn set_session_label(label: impl Into<String>) {
    if let Ok(mut guard) = SESSION_LABEL.write() {
        *guard = Some(label.into());
    }
}

/// Clears the session label, e.g. on logout.
pub fn clear_session_label() {
    if let Ok(mut guard) = SESSION_LABEL.write() {
        *guard = None;
    }
}

/// Returns the current session label, or `"anonymous"` when none was set.
pub fn session_label() -> String {
    SESSION_LABEL
        .read()
        .ok()
        .and_then(|guard| guard.clone())
        .unwrap_or_else(|| ANONYMOUS_LABEL.to_string())
}

/// Logs a trace-level message tagged with the session label.
#[macro_export]
macro_rules! dashboard_trace {
    ($($arg:tt)*) => {{
        log::trace!("[{}] {}", $crate::session_label(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the session label.
#[macro_export]
macro_rules! dashboard_debug {
    ($($arg:tt)*) => {{
        log::debug!("[{}] {}", $crate::session_label(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the session label.
#[macro_export]
macro_rules! dashboard_info {
    ($($arg:tt)*) => {{
        log::info!("[{}] {}", $crate::session_label(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the session label.
#[macro_export]
macro_rules! dashboard_warn {
    ($($arg:tt)*) => {{
        log::warn!("[{}] {}", $crate::session_label(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the session label.
#[macro_export]
macro_rules! dashboard_error {
    ($($arg:tt)*) => {{
        log::error!("[{}] {}", $crate::session_label(), format_args!($($arg)*));
    }};
}

/// Installs a debug-level terminal logger for tests. Safe to call from many
/// tests; only the first call installs anything.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let config = ConfigBuilder::new().set_time_level(log::LevelFilter::Off).build();
    let _ = TermLogger::init(
        log::LevelFilter::Debug,
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}

#[cfg(test)]
mod tests {
    use super::{clear_session_label, session_label, set_session_label};

    #[test]
    fn label_defaults_to_anonymous_and_can_be_replaced() {
        clear_session_label();
        assert_eq!(session_label(), "anonymous");

        set_session_label("alice");
        assert_eq!(session_label(), "alice");
        dashboard_info!("logged in as {}", "alice");

        clear_session_label();
        assert_eq!(session_label(), "anonymous");
    }
}
