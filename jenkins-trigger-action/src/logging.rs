//! Log setup
//!
//! Builds the subscriber for a run. It is handed to the action future rather
//! than installed process-wide.

use tracing::Dispatch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

const DEFAULT_LEVEL: &str = "info";

/// Creates the log dispatcher for the given level
///
/// Returns the dispatcher and, when the level could not be understood, the
/// rejected value so the caller can report it once logging is active.
pub fn dispatch(level: Option<&str>) -> (Dispatch, Option<String>) {
    let requested = level.map(str::trim).filter(|level| !level.is_empty());
    let directive = requested.map(normalize_level).unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    let (filter, rejected) = match EnvFilter::try_new(&directive) {
        Ok(filter) => (filter, None),
        Err(_) => (EnvFilter::new(DEFAULT_LEVEL), requested.map(str::to_string)),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false),
    );

    (Dispatch::new(subscriber), rejected)
}

/// Maps common level spellings onto tracing directives
fn normalize_level(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("INFO"), "info");
        assert_eq!(normalize_level("WARNING"), "warn");
        assert_eq!(normalize_level("critical"), "error");
        assert_eq!(normalize_level("debug"), "debug");
    }

    #[test]
    fn test_dispatch_accepts_levels() {
        assert!(dispatch(None).1.is_none());
        assert!(dispatch(Some("")).1.is_none());
        assert!(dispatch(Some("DEBUG")).1.is_none());
        assert!(dispatch(Some("jenkins_trigger_action=trace")).1.is_none());
    }

    #[test]
    fn test_dispatch_reports_rejected_level() {
        let (_, rejected) = dispatch(Some("deploy=loud"));
        assert_eq!(rejected.as_deref(), Some("deploy=loud"));
    }
}
