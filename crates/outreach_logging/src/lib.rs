#![deny(missing_docs)]
//! Shared logging utilities for the outreach workspace.
//!
//! This crate provides the `outreach_*` logging macros used across the
//! codebase, a helper for keeping secrets out of log lines, and a minimal
//! test initializer for the global logger.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! outreach_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! outreach_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! outreach_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! outreach_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! outreach_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Renders a secret for log output without revealing its content.
///
/// Only the length and, for keys that carry a well-known prefix, the prefix
/// itself are shown.
pub fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(3).collect();
    if secret.is_empty() {
        "<empty>".to_string()
    } else if prefix == "sk-" && secret.chars().count() > 3 {
        format!("sk-*** ({} chars)", secret.chars().count())
    } else {
        format!("*** ({} chars)", secret.chars().count())
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::redact;

    #[test]
    fn redact_hides_key_body() {
        assert_eq!(redact(""), "<empty>");
        assert_eq!(redact("sk-abcdef"), "sk-*** (9 chars)");
        assert_eq!(redact("bad-key"), "*** (7 chars)");
        assert!(!redact("sk-secretvalue").contains("secret"));
    }
}
