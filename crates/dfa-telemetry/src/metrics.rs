//! Prometheus metrics for the data feed server.
//!
//! All metrics follow the naming convention: `dfa_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // FEED UPDATE METRICS
    // =========================================================================

    /// Accepted signed Beacon updates
    pub static ref BEACON_UPDATES: Counter = Counter::new(
        "dfa_beacon_updates_total",
        "Total number of accepted signed Beacon updates"
    ).expect("metric creation failed");

    /// Accepted Beacon set aggregations
    pub static ref BEACON_SET_UPDATES: Counter = Counter::new(
        "dfa_beacon_set_updates_total",
        "Total number of accepted Beacon set updates"
    ).expect("metric creation failed");

    /// Accepted OEV proxy updates
    pub static ref OEV_UPDATES: Counter = Counter::new(
        "dfa_oev_updates_total",
        "Total number of accepted OEV proxy data feed updates"
    ).expect("metric creation failed");

    // =========================================================================
    // SETTLEMENT & REGISTRY METRICS
    // =========================================================================

    /// Successful OEV proxy withdrawals
    pub static ref OEV_WITHDRAWALS: Counter = Counter::new(
        "dfa_oev_withdrawals_total",
        "Total number of successful OEV proxy withdrawals"
    ).expect("metric creation failed");

    /// dAPI name assignments
    pub static ref DAPI_NAMES_SET: Counter = Counter::new(
        "dfa_dapi_names_set_total",
        "Total number of dAPI name assignments"
    ).expect("metric creation failed");

    // =========================================================================
    // ERROR METRICS
    // =========================================================================

    /// Rejected calls by operation and reason
    pub static ref REJECTED_CALLS: CounterVec = CounterVec::new(
        Opts::new("dfa_rejected_calls_total", "Rejected calls by operation and reason"),
        &["operation", "reason"]
    ).expect("metric creation failed");
}

/// Handle proving the metrics were registered.
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    /// Encode all registered metrics as Prometheus text format.
    pub fn gather(&self) -> Result<String, TelemetryError> {
        encode_registry(&self.registry)
    }
}

/// Register all metrics with the global registry.
///
/// Idempotent: registering twice is not an error.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(BEACON_UPDATES.clone()),
        Box::new(BEACON_SET_UPDATES.clone()),
        Box::new(OEV_UPDATES.clone()),
        Box::new(OEV_WITHDRAWALS.clone()),
        Box::new(DAPI_NAMES_SET.clone()),
        Box::new(REJECTED_CALLS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: REGISTRY.clone(),
    })
}

/// Encode all metrics of the global registry as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    encode_registry(&REGISTRY)
}

fn encode_registry(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
