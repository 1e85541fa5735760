//! Structured logging configuration.
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! picks those records up alongside `tracing` events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Initialize logging for the chosen backend
///
/// Log levels come from `RUST_LOG` (default `info`).
///
/// # Example
///
/// ```no_run
/// use fe_cli::config::LogFormat;
/// use fe_cli::logging;
///
/// logging::init(LogFormat::Structured);
/// tracing::info!("Event loaded");
/// ```
pub fn init(format: LogFormat) {
    match format {
        LogFormat::Structured => {
            let env_filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Plain => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .format_target(false)
                .init();
        }
    }

    tracing::debug!(?format, "Logging initialized");
}

/// Log the outcome of a generation step
///
/// # Arguments
///
/// * `stage_id` - Stage the structures belong to
/// * `kind` - What was generated (pools, bracket, standings)
/// * `count` - Number of records produced
/// * `duration_ms` - Wall time of the step
pub fn log_generation(stage_id: i64, kind: &str, count: usize, duration_ms: u64) {
    tracing::info!(
        stage_id = stage_id,
        kind = kind,
        count = count,
        duration_ms = duration_ms,
        "Generated {}",
        kind
    );
}

/// Log performance metric
///
/// # Arguments
///
/// * `operation` - Operation name
/// * `duration_ms` - Duration in milliseconds
/// * `metadata` - Additional metadata
///
/// # Example
///
/// ```
/// use fe_cli::logging::log_performance;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// // ... do work ...
/// let duration = start.elapsed().as_millis() as u64;
/// log_performance("save_event", duration, Some("event.json"));
/// ```
pub fn log_performance(operation: &str, duration_ms: u64, metadata: Option<&str>) {
    if duration_ms > 1000 {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "PERFORMANCE: Slow operation"
        );
    } else {
        tracing::debug!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "Performance metric"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_generation() {
        // Just ensure it doesn't panic without a subscriber
        log_generation(1, "pools", 4, 3);
    }

    #[test]
    fn test_log_performance() {
        log_performance("load_event", 12, Some("event.json"));
        log_performance("slow_operation", 2000, None);
    }
}
