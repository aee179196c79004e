use serde::Serialize;
use serde_json::Value;

use super::{PerformanceStats, SystemStats};

/// Everything the reporting endpoint can serve for one window.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringReport {
    pub window_ms: u64,
    pub generated_at_ms: i64,
    pub performance: PerformanceStats,
    pub system: SystemStats,
}

/// Closed set of individually addressable report fields.
///
/// The `metric` query parameter is resolved against this table instead
/// of poking at the serialized report by name, so an unknown metric is
/// an explicit not-found rather than a silent null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    TotalRequests,
    AverageResponseTimeMs,
    ErrorRatePct,
    ResponseTimes,
    SlowestEndpoints,
    StatusCodeDistribution,
    AverageCpuUsagePct,
    AverageMemoryUsagePct,
    AverageDiskUsagePct,
    PeakActiveConnections,
    AverageRequestsPerMinute,
}

impl MetricKey {
    /// Name → key table; names are the snake_case JSON field names.
    pub const ALL: &'static [(&'static str, MetricKey)] = &[
        ("total_requests", MetricKey::TotalRequests),
        ("average_response_time_ms", MetricKey::AverageResponseTimeMs),
        ("error_rate_pct", MetricKey::ErrorRatePct),
        ("response_times", MetricKey::ResponseTimes),
        ("slowest_endpoints", MetricKey::SlowestEndpoints),
        ("status_code_distribution", MetricKey::StatusCodeDistribution),
        ("average_cpu_usage_pct", MetricKey::AverageCpuUsagePct),
        ("average_memory_usage_pct", MetricKey::AverageMemoryUsagePct),
        ("average_disk_usage_pct", MetricKey::AverageDiskUsagePct),
        ("peak_active_connections", MetricKey::PeakActiveConnections),
        ("average_requests_per_minute", MetricKey::AverageRequestsPerMinute),
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, key)| *key)
    }

    /// Pull the addressed field out of a computed report.
    pub fn select(self, report: &MonitoringReport) -> Value {
        let perf = &report.performance;
        let system = &report.system;
        match self {
            MetricKey::TotalRequests => Value::from(perf.total_requests),
            MetricKey::AverageResponseTimeMs => Value::from(perf.average_response_time_ms),
            MetricKey::ErrorRatePct => Value::from(perf.error_rate_pct),
            MetricKey::ResponseTimes => to_value(&perf.response_times),
            MetricKey::SlowestEndpoints => to_value(&perf.slowest_endpoints),
            MetricKey::StatusCodeDistribution => to_value(&perf.status_code_distribution),
            MetricKey::AverageCpuUsagePct => Value::from(system.average_cpu_usage_pct),
            MetricKey::AverageMemoryUsagePct => Value::from(system.average_memory_usage_pct),
            MetricKey::AverageDiskUsagePct => Value::from(system.average_disk_usage_pct),
            MetricKey::PeakActiveConnections => Value::from(system.peak_active_connections),
            MetricKey::AverageRequestsPerMinute => Value::from(system.average_requests_per_minute),
        }
    }
}

fn to_value<T: Serialize>(v: &T) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PerformanceMonitor;

    fn report() -> MonitoringReport {
        let monitor = PerformanceMonitor::default();
        monitor.record_request(crate::metrics::RequestSample {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            endpoint: "/api/services".into(),
            method: "GET".into(),
            response_time_ms: 42,
            status_code: 200,
            user_agent: None,
            source_address: None,
            user_id: None,
        });
        MonitoringReport {
            window_ms: 3_600_000,
            generated_at_ms: chrono::Utc::now().timestamp_millis(),
            performance: monitor.performance_stats(3_600_000),
            system: monitor.system_stats(3_600_000),
        }
    }

    #[test]
    fn parses_known_names_and_rejects_unknown() {
        assert_eq!(MetricKey::parse("total_requests"), Some(MetricKey::TotalRequests));
        assert_eq!(
            MetricKey::parse("peak_active_connections"),
            Some(MetricKey::PeakActiveConnections)
        );
        assert_eq!(MetricKey::parse("throughput"), None);
        assert_eq!(MetricKey::parse(""), None);
        // Casing matters: these are exact JSON field names.
        assert_eq!(MetricKey::parse("TotalRequests"), None);
    }

    #[test]
    fn every_table_entry_selects_a_value() {
        let report = report();
        for (name, key) in MetricKey::ALL {
            let value = key.select(&report);
            assert!(!value.is_null(), "metric {name} selected null");
        }
    }

    #[test]
    fn selects_scalar_fields_from_the_right_section() {
        let report = report();
        assert_eq!(MetricKey::TotalRequests.select(&report), Value::from(1u64));
        assert_eq!(
            MetricKey::AverageResponseTimeMs.select(&report),
            Value::from(42.0)
        );
        assert_eq!(
            MetricKey::PeakActiveConnections.select(&report),
            Value::from(0u64)
        );
    }
}
