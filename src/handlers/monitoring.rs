use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use crate::metrics::{MetricKey, MonitoringReport, RequestSample, SystemSample};
use crate::AppState;

use super::AppError;

/// SSE push cadence for the live monitoring feed.
const STREAM_INTERVAL: Duration = Duration::from_secs(2);

fn build_report(state: &AppState, window_ms: u64) -> MonitoringReport {
    MonitoringReport {
        window_ms,
        generated_at_ms: chrono::Utc::now().timestamp_millis(),
        performance: state.monitor.performance_stats(window_ms),
        system: state.monitor.system_stats(window_ms),
    }
}

// ─── GET /api/monitoring/performance ─────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub window_ms: Option<String>,
    pub metric: Option<String>,
}

pub async fn get_performance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let window_ms = match query.window_ms.as_deref() {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            AppError::BadRequest("window_ms must be a non-negative integer".into())
        })?,
        None => state.config.monitor.default_window_ms,
    };

    let report = build_report(&state, window_ms);

    match query.metric.as_deref() {
        Some(name) => {
            let key = MetricKey::parse(name)
                .ok_or_else(|| AppError::NotFound(format!("Metric '{name}' not found")))?;
            Ok(Json(key.select(&report)).into_response())
        }
        None => Ok(Json(report).into_response()),
    }
}

// ─── POST /api/monitoring/performance ────────────────────────────
// Telemetry ingest for external producers: request outcomes by
// default, resource readings when `type` is "system". Unknown fields
// are ignored and missing ones default to zero; recording must not
// fail the producer.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordRequest {
    pub r#type: Option<String>,

    // Request-sample fields
    pub endpoint: Option<String>,
    pub method: Option<String>,
    #[serde(alias = "responseTime", alias = "responseTimeMs")]
    pub response_time_ms: Option<f64>,
    #[serde(alias = "statusCode")]
    pub status_code: Option<u16>,
    #[serde(alias = "userAgent")]
    pub user_agent: Option<String>,
    #[serde(alias = "ip", alias = "sourceAddress")]
    pub source_address: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<u64>,

    // System-sample fields
    #[serde(alias = "cpuUsage", alias = "cpuUsagePct")]
    pub cpu_usage_pct: Option<f64>,
    #[serde(alias = "memoryUsage", alias = "memoryUsagePct")]
    pub memory_usage_pct: Option<f64>,
    #[serde(alias = "diskUsage", alias = "diskUsagePct")]
    pub disk_usage_pct: Option<f64>,
    #[serde(alias = "activeConnections")]
    pub active_connections: Option<u64>,
    #[serde(alias = "requestsPerMinute")]
    pub requests_per_minute: Option<f64>,
}

pub async fn record_sample(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecordRequest>,
) -> Json<serde_json::Value> {
    let timestamp_ms = chrono::Utc::now().timestamp_millis();

    if body.r#type.as_deref() == Some("system") {
        state.monitor.record_system(SystemSample {
            timestamp_ms,
            cpu_usage_pct: body.cpu_usage_pct.unwrap_or(0.0),
            memory_usage_pct: body.memory_usage_pct.unwrap_or(0.0),
            disk_usage_pct: body.disk_usage_pct.unwrap_or(0.0),
            active_connections: body.active_connections.unwrap_or(0),
            requests_per_minute: body.requests_per_minute.unwrap_or(0.0),
        });
    } else {
        state.monitor.record_request(RequestSample {
            timestamp_ms,
            endpoint: body.endpoint.unwrap_or_default(),
            method: body.method.unwrap_or_default(),
            response_time_ms: body.response_time_ms.unwrap_or(0.0).max(0.0) as u64,
            status_code: body.status_code.unwrap_or(0),
            user_agent: body.user_agent,
            source_address: body.source_address,
            user_id: body.user_id,
        });
    }

    Json(json!({ "success": true }))
}

// ─── GET /api/monitoring/stream ──────────────────────────────────
// Server-Sent Events: pushes a full report over the default window on
// every tick so a dashboard can render without polling.

pub async fn monitoring_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let interval = tokio::time::interval(STREAM_INTERVAL);

    let stream = IntervalStream::new(interval).map(move |_| {
        let report = build_report(&state, state.config.monitor.default_window_ms);
        let json = serde_json::to_string(&report).unwrap_or_default();
        Ok(Event::default().data(json))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
