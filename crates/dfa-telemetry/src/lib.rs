//! # Data Feed Telemetry
//!
//! Logging and metrics for the data feed server.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with env filter, pretty or JSON output
//! - **Metrics**: Prometheus counters for accepted and rejected calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dfa_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let telemetry = init_telemetry(&TelemetryConfig::from_env())?;
//! let exposition = telemetry.metrics.gather()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DFA_SERVICE_NAME` | `data-feed-server` | Service name in logs |
//! | `DFA_LOG_LEVEL` | `info` | Log level filter |
//! | `DFA_JSON_LOGS` | `false` | JSON log lines |
//! | `DFA_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, BEACON_SET_UPDATES, BEACON_UPDATES,
    DAPI_NAMES_SET, OEV_UPDATES, OEV_WITHDRAWALS, REJECTED_CALLS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Handles kept alive by the process that initialised telemetry.
#[derive(Debug)]
pub struct TelemetryGuard {
    /// Registered metrics.
    pub metrics: MetricsHandle,
}

/// Initialize logging and register metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    init_logging(config)?;
    Ok(TelemetryGuard { metrics })
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
