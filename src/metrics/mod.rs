pub mod monitor;
pub mod percentiles;
pub mod report;

pub use monitor::{PerformanceMonitor, PerformanceStats, SystemStats};
pub use report::{MetricKey, MonitoringReport};

use serde::{Deserialize, Serialize};

/// One request observation, the "write" side of the monitor.
/// The telemetry middleware builds these for every API call; external
/// producers can push them through `POST /api/monitoring/performance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSample {
    /// Milliseconds since the Unix epoch, assigned at record time.
    pub timestamp_ms: i64,
    /// Route template, e.g. "/api/bookings/:id".
    pub endpoint: String,
    /// HTTP verb as a short string ("GET", "POST", ...).
    pub method: String,
    /// Handler wall time in milliseconds.
    pub response_time_ms: u64,
    /// Result code; >= 400 counts as an error.
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// One resource-utilization reading, nominally pushed once per minute
/// by an external scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSample {
    pub timestamp_ms: i64,
    pub cpu_usage_pct: f64,
    pub memory_usage_pct: f64,
    pub disk_usage_pct: f64,
    pub active_connections: u64,
    pub requests_per_minute: f64,
}
