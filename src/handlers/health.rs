use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

// ─── GET /api/health ─────────────────────────────────────────────

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let t0 = Instant::now();
    let (users_count, services_count, bookings_count) = state.store.counts();
    let store_ms = t0.elapsed().as_millis() as u64;

    let (request_samples, system_samples) = state.monitor.sample_counts();

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_secs": state.started.elapsed().as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": std::env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
        "checks": {
            "store": {
                "status": "healthy",
                "response_time_ms": store_ms,
                "users_count": users_count,
                "services_count": services_count,
                "bookings_count": bookings_count,
            },
            "monitor": {
                "status": "healthy",
                "request_samples": request_samples,
                "system_samples": system_samples,
            },
        },
        "services": {
            "authentication": "operational",
            "booking": "operational",
            "payment": "operational",
            "monitoring": "operational",
        },
    }))
}
