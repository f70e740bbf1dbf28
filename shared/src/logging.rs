//! Shared logging utilities for consistent tracing across the workflow

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Filter directives for the alert workflow at the given base level
pub fn filter_directives(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!("dispatcher={base_level},shared={base_level},reqwest=warn,hyper=warn")
}

/// Initialize the stdout tracing subscriber.
///
/// `RUST_LOG` wins over the computed directives when it is set.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for recipient-aware info logging
#[macro_export]
macro_rules! recipient_info {
    ($recipient:expr, $($arg:tt)*) => {
        tracing::info!(
            recipient = %$recipient,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for recipient-aware warning logging
#[macro_export]
macro_rules! recipient_warn {
    ($recipient:expr, $($arg:tt)*) => {
        tracing::warn!(
            recipient = %$recipient,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for recipient-aware error logging
#[macro_export]
macro_rules! recipient_error {
    ($recipient:expr, $($arg:tt)*) => {
        tracing::error!(
            recipient = %$recipient,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for recipient-aware debug logging
#[macro_export]
macro_rules! recipient_debug {
    ($recipient:expr, $($arg:tt)*) => {
        tracing::debug!(
            recipient = %$recipient,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = format_timestamp(), "🚀 Starting {}", details);
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(message: &str) {
    info!(timestamp = format_timestamp(), "✅ {}", message);
}
