use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::metrics::RequestSample;
use crate::AppState;

/// Records a [`RequestSample`] for every API request after its
/// response is produced, and emits the per-request log line.
///
/// This is the telemetry producer from the monitor's point of view: it
/// runs on every handler outcome, including errors, and nothing in
/// here can fail the request it wraps.
pub async fn telemetry_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    // Route template when matched ("/api/bookings/:id"), so samples
    // group per endpoint rather than per id.
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| path.clone());
    let user_agent = header_value(&req, header::USER_AGENT.as_str());
    let source_address = header_value(&req, "x-forwarded-for");

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    // Skip the long-lived SSE feed; one open stream would sit in the
    // window as a single giant sample.
    if path.starts_with("/api/") && !path.contains("/stream") {
        state.monitor.record_request(RequestSample {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            endpoint,
            method: method.clone(),
            response_time_ms: elapsed_ms,
            status_code: status,
            user_agent,
            source_address,
            user_id: None,
        });

        tracing::info!(%method, %path, status, elapsed_ms, "request");
    }

    response
}

fn header_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
