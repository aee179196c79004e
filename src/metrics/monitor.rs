use std::collections::{BTreeMap, HashMap, VecDeque};

use hdrhistogram::Histogram;
use parking_lot::Mutex;
use serde::Serialize;

use super::percentiles::PercentileSet;
use super::{RequestSample, SystemSample};

// ─── Configuration ───────────────────────────────────────────────

/// Retention cap for individual request samples.
pub const DEFAULT_MAX_REQUEST_SAMPLES: usize = 10_000;

/// Retention cap for system samples (one per minute for 24 hours).
pub const DEFAULT_MAX_SYSTEM_SAMPLES: usize = 1_440;

/// Trailing window used when a caller does not ask for one (1 hour).
pub const DEFAULT_WINDOW_MS: u64 = 3_600_000;

/// How many endpoint groups the slowest-endpoints table reports.
const SLOWEST_ENDPOINTS_LIMIT: usize = 10;

/// Histogram range for response times: 1 ms → 1 h, 3 significant figures.
const HIST_LOW: u64 = 1;
const HIST_HIGH: u64 = 3_600_000;
const HIST_SIGFIG: u8 = 3;

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe performance monitor.
///
/// Owns two bounded, insertion-ordered sample sequences and derives
/// summary statistics over a caller-specified trailing window. One
/// instance is built at startup and shared through `AppState`; both
/// record paths and all reads go through a single lock, so
/// append-with-eviction is atomic and the caps hold under concurrent
/// producers.
pub struct PerformanceMonitor {
    inner: Mutex<Inner>,
}

/// Windowed request statistics. All-zero when the window is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub total_requests: u64,
    /// Mean handler time, rounded to the nearest whole millisecond.
    pub average_response_time_ms: f64,
    /// Share of samples with status >= 400, rounded to 2 decimals.
    pub error_rate_pct: f64,
    pub response_times: PercentileSet,
    pub slowest_endpoints: Vec<EndpointStats>,
    /// Status-class ("2xx", "4xx", ...) → sample count.
    pub status_code_distribution: BTreeMap<String, u64>,
}

/// Per-endpoint rollup, keyed by verb + route template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointStats {
    /// e.g. "GET /api/bookings/:id"
    pub endpoint: String,
    pub average_response_time_ms: f64,
    pub request_count: u64,
    pub error_rate_pct: f64,
}

/// Windowed resource statistics. All-zero when the window is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStats {
    pub average_cpu_usage_pct: f64,
    pub average_memory_usage_pct: f64,
    pub average_disk_usage_pct: f64,
    pub peak_active_connections: u64,
    pub average_requests_per_minute: u64,
}

// ─── Internal state ──────────────────────────────────────────────

struct Inner {
    request_samples: VecDeque<RequestSample>,
    system_samples: VecDeque<SystemSample>,
    max_request_samples: usize,
    max_system_samples: usize,
}

// ─── PerformanceMonitor impl ─────────────────────────────────────

impl PerformanceMonitor {
    pub fn new(max_request_samples: usize, max_system_samples: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                request_samples: VecDeque::new(),
                system_samples: VecDeque::new(),
                max_request_samples: max_request_samples.max(1),
                max_system_samples: max_system_samples.max(1),
            }),
        }
    }

    /// Append a request observation, evicting the oldest entries once
    /// the cap is exceeded. Best-effort telemetry: never fails.
    pub fn record_request(&self, sample: RequestSample) {
        let mut inner = self.inner.lock();
        inner.request_samples.push_back(sample);
        while inner.request_samples.len() > inner.max_request_samples {
            inner.request_samples.pop_front();
        }
    }

    /// Same contract as [`record_request`](Self::record_request), for
    /// resource-utilization readings.
    pub fn record_system(&self, sample: SystemSample) {
        let mut inner = self.inner.lock();
        inner.system_samples.push_back(sample);
        while inner.system_samples.len() > inner.max_system_samples {
            inner.system_samples.pop_front();
        }
    }

    /// Retained request samples newer than `now - window_ms`, in
    /// insertion order. A sample exactly at the cutoff is excluded.
    pub fn request_samples(&self, window_ms: u64) -> Vec<RequestSample> {
        self.request_samples_at(now_ms(), window_ms)
    }

    /// Retained system samples newer than `now - window_ms`.
    pub fn system_samples(&self, window_ms: u64) -> Vec<SystemSample> {
        self.system_samples_at(now_ms(), window_ms)
    }

    /// Request statistics over the trailing window.
    pub fn performance_stats(&self, window_ms: u64) -> PerformanceStats {
        self.performance_stats_at(now_ms(), window_ms)
    }

    /// Resource statistics over the trailing window.
    pub fn system_stats(&self, window_ms: u64) -> SystemStats {
        self.system_stats_at(now_ms(), window_ms)
    }

    /// Current buffer fill: (request samples, system samples).
    pub fn sample_counts(&self) -> (usize, usize) {
        let inner = self.inner.lock();
        (inner.request_samples.len(), inner.system_samples.len())
    }

    // Explicit-clock variants keep the window math deterministic in
    // tests; the public methods above pin `now` to the wall clock.

    pub(crate) fn request_samples_at(&self, now_ms: i64, window_ms: u64) -> Vec<RequestSample> {
        let cutoff = cutoff(now_ms, window_ms);
        self.inner
            .lock()
            .request_samples
            .iter()
            .filter(|s| s.timestamp_ms > cutoff)
            .cloned()
            .collect()
    }

    pub(crate) fn system_samples_at(&self, now_ms: i64, window_ms: u64) -> Vec<SystemSample> {
        let cutoff = cutoff(now_ms, window_ms);
        self.inner
            .lock()
            .system_samples
            .iter()
            .filter(|s| s.timestamp_ms > cutoff)
            .cloned()
            .collect()
    }

    pub(crate) fn performance_stats_at(&self, now_ms: i64, window_ms: u64) -> PerformanceStats {
        compute_performance_stats(&self.request_samples_at(now_ms, window_ms))
    }

    pub(crate) fn system_stats_at(&self, now_ms: i64, window_ms: u64) -> SystemStats {
        compute_system_stats(&self.system_samples_at(now_ms, window_ms))
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUEST_SAMPLES, DEFAULT_MAX_SYSTEM_SAMPLES)
    }
}

// ─── Statistics ──────────────────────────────────────────────────

fn compute_performance_stats(samples: &[RequestSample]) -> PerformanceStats {
    if samples.is_empty() {
        return PerformanceStats {
            total_requests: 0,
            average_response_time_ms: 0.0,
            error_rate_pct: 0.0,
            response_times: PercentileSet::empty(),
            slowest_endpoints: Vec::new(),
            status_code_distribution: BTreeMap::new(),
        };
    }

    let total_requests = samples.len() as u64;
    let total_time: u64 = samples.iter().map(|s| s.response_time_ms).sum();
    let error_count = samples.iter().filter(|s| s.status_code >= 400).count() as u64;

    // ── Per-endpoint rollup, keyed by (method, endpoint) ────────
    // Accumulators live in a Vec so groups keep first-encounter
    // order; the descending sort below is stable, so equal means
    // do not reorder.
    struct Acc {
        method: String,
        endpoint: String,
        count: u64,
        total_time: u64,
        errors: u64,
    }
    let mut groups: Vec<Acc> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    let mut hist =
        Histogram::<u64>::new_with_bounds(HIST_LOW, HIST_HIGH, HIST_SIGFIG).expect("histogram bounds");

    for sample in samples {
        let _ = hist.record(sample.response_time_ms.max(1));

        let key = (sample.method.clone(), sample.endpoint.clone());
        let idx = *index.entry(key).or_insert_with(|| {
            groups.push(Acc {
                method: sample.method.clone(),
                endpoint: sample.endpoint.clone(),
                count: 0,
                total_time: 0,
                errors: 0,
            });
            groups.len() - 1
        });
        let acc = &mut groups[idx];
        acc.count += 1;
        acc.total_time += sample.response_time_ms;
        if sample.status_code >= 400 {
            acc.errors += 1;
        }
    }

    let mut slowest_endpoints: Vec<EndpointStats> = groups
        .into_iter()
        .map(|g| EndpointStats {
            endpoint: format!("{} {}", g.method, g.endpoint),
            average_response_time_ms: g.total_time as f64 / g.count as f64,
            request_count: g.count,
            error_rate_pct: g.errors as f64 / g.count as f64 * 100.0,
        })
        .collect();
    slowest_endpoints.sort_by(|a, b| {
        b.average_response_time_ms
            .partial_cmp(&a.average_response_time_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    slowest_endpoints.truncate(SLOWEST_ENDPOINTS_LIMIT);

    // ── Status-class distribution ───────────────────────────────
    let mut status_code_distribution: BTreeMap<String, u64> = BTreeMap::new();
    for sample in samples {
        let class = format!("{}xx", sample.status_code / 100);
        *status_code_distribution.entry(class).or_insert(0) += 1;
    }

    PerformanceStats {
        total_requests,
        average_response_time_ms: (total_time as f64 / total_requests as f64).round(),
        error_rate_pct: round2(error_count as f64 / total_requests as f64 * 100.0),
        response_times: PercentileSet::from_histogram(&hist),
        slowest_endpoints,
        status_code_distribution,
    }
}

fn compute_system_stats(samples: &[SystemSample]) -> SystemStats {
    if samples.is_empty() {
        return SystemStats {
            average_cpu_usage_pct: 0.0,
            average_memory_usage_pct: 0.0,
            average_disk_usage_pct: 0.0,
            peak_active_connections: 0,
            average_requests_per_minute: 0,
        };
    }

    let n = samples.len() as f64;
    let mean = |f: fn(&SystemSample) -> f64| samples.iter().map(f).sum::<f64>() / n;

    SystemStats {
        average_cpu_usage_pct: round2(mean(|s| s.cpu_usage_pct)),
        average_memory_usage_pct: round2(mean(|s| s.memory_usage_pct)),
        average_disk_usage_pct: round2(mean(|s| s.disk_usage_pct)),
        peak_active_connections: samples.iter().map(|s| s.active_connections).max().unwrap_or(0),
        average_requests_per_minute: mean(|s| s.requests_per_minute).round() as u64,
    }
}

// ─── Helpers ─────────────────────────────────────────────────────

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn cutoff(now_ms: i64, window_ms: u64) -> i64 {
    now_ms.saturating_sub(window_ms.min(i64::MAX as u64) as i64)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ─── Tests ───────────────────────────────────────────────────────
