pub mod auth;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod store;
pub mod validation;

use std::time::Instant;

use config::AppConfig;
use metrics::PerformanceMonitor;
use store::DataStore;

/// Shared application state available to every handler via
/// `State<Arc<AppState>>`. Built once in the composition root; the
/// monitor and store manage their own interior locking.
pub struct AppState {
    /// In-memory data store, seeded with the service catalog.
    pub store: DataStore,

    /// Central performance monitor. The middleware pushes samples,
    /// the monitoring endpoints read reports.
    pub monitor: PerformanceMonitor,

    pub config: AppConfig,

    /// Process start, for the health endpoint's uptime.
    pub started: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: DataStore::seeded(),
            monitor: PerformanceMonitor::new(
                config.monitor.max_request_samples,
                config.monitor.max_system_samples,
            ),
            config,
            started: Instant::now(),
        }
    }
}
