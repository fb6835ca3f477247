//! Shared logging utilities for consistent tracing across the hub

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{error, info};

/// Subsystem tag attached to every structured log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// HTTP layer and process lifecycle
    Server,
    /// Entity store backends
    Store,
    /// Typed repository (validation, integrity checks, score cache)
    Repository,
    /// Aggregation engine and presentation
    Analytics,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Server => write!(f, "server"),
            Component::Store => write!(f, "store"),
            Component::Repository => write!(f, "repository"),
            Component::Analytics => write!(f, "analytics"),
        }
    }
}

/// Build the default filter directive for a base level
pub fn default_filter(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!(
        "webserver={base_level},hackathon_webserver={base_level},shared={base_level},tower_http=debug,axum={base_level}"
    )
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins over the level passed on the command line. Calling this
/// twice is harmless; the second subscriber is ignored.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level_filter = default_filter(log_level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level_filter));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for component-aware info logging
#[macro_export]
macro_rules! component_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::info!(
            component = %$component,
            $($arg)*
        );
    };
}

/// Macro for component-aware warning logging
#[macro_export]
macro_rules! component_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::warn!(
            component = %$component,
            $($arg)*
        );
    };
}

/// Macro for component-aware error logging
#[macro_export]
macro_rules! component_error {
    ($component:expr, $($arg:tt)*) => {
        tracing::error!(
            component = %$component,
            $($arg)*
        );
    };
}

/// Macro for component-aware debug logging
#[macro_export]
macro_rules! component_debug {
    ($component:expr, $($arg:tt)*) => {
        tracing::debug!(
            component = %$component,
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(component: Component, details: &str) {
    info!(
        component = %component,
        started_at = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(component: Component, reason: &str) {
    info!(
        component = %component,
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(component: Component, context: &str, error: &dyn std::fmt::Display) {
    error!(
        component = %component,
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(component: Component, message: &str) {
    info!(
        component = %component,
        "✅ {}",
        message
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_display() {
        assert_eq!(Component::Server.to_string(), "server");
        assert_eq!(Component::Store.to_string(), "store");
        assert_eq!(Component::Repository.to_string(), "repository");
        assert_eq!(Component::Analytics.to_string(), "analytics");
    }

    #[test]
    fn test_default_filter_uses_level() {
        let filter = default_filter(Some("debug"));
        assert!(filter.contains("webserver=debug"));
        assert!(filter.contains("shared=debug"));

        let filter = default_filter(None);
        assert!(filter.contains("webserver=info"));
    }
}
