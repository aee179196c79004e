//! Endpoint tests driving the full router in-process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use skyvision::{config::AppConfig, server::create_router, AppState};

fn app() -> Router {
    create_router(Arc::new(AppState::new(AppConfig::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_user(app: &Router, email: &str) -> u64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "full_name": "Asha Rao",
            "email": email,
            "phone": "+91 98765 43210",
            "password": "s3cret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_u64().expect("user id")
}

async fn create_booking(app: &Router, user_id: u64) -> u64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/bookings",
        Some(json!({
            "user_id": user_id,
            "service_id": 2,
            "location": "Pune, Maharashtra",
            "booking_date": "2026-09-14",
            "time_slot": "morning",
            "duration_hours": 3,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_u64().expect("booking id")
}

// ─── Health / docs ───────────────────────────────────────────────

#[tokio::test]
async fn health_reports_seeded_store() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["services_count"], 6);
    assert_eq!(body["checks"]["store"]["users_count"], 0);
    assert_eq!(body["services"]["monitoring"], "operational");
}

#[tokio::test]
async fn docs_section_selector() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/docs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]["bookings"].is_object());

    let (status, body) = send(&app, "GET", "/api/docs?section=error_codes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["404"], "Not Found - Resource not found");

    let (status, _) = send(&app, "GET", "/api/docs?section=nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Auth ────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_login() {
    let app = app();
    register_user(&app, "asha@example.com").await;

    // Same email again conflicts, case-insensitively.
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "full_name": "Asha Rao",
            "email": "ASHA@example.com",
            "phone": "+91 98765 43210",
            "password": "s3cret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with this email already exists");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "asha@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "asha@example.com", "password": "s3cret-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().expect("token");
    let claims = skyvision::auth::verify_jwt(token, "fallback-secret").expect("valid token");
    assert_eq!(claims.email, "asha@example.com");
}

#[tokio::test]
async fn register_validates_input() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/auth/register", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "full_name": "Asha Rao",
            "email": "not-an-email",
            "phone": "+91 98765 43210",
            "password": "s3cret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid email address");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "full_name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "password": "short",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 8 characters long");
}

#[tokio::test]
async fn forgot_password_does_not_reveal_accounts() {
    let app = app();
    register_user(&app, "asha@example.com").await;

    let (status, known) = send(
        &app,
        "POST",
        "/api/auth/forgot-password",
        Some(json!({ "email": "asha@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, unknown) = send(
        &app,
        "POST",
        "/api/auth/forgot-password",
        Some(json!({ "email": "nobody@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(known, unknown);
}

// ─── Services ────────────────────────────────────────────────────

#[tokio::test]
async fn service_catalog() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/services", None).await;
    assert_eq!(status, StatusCode::OK);
    let services = body.as_array().expect("array");
    assert_eq!(services.len(), 6);
    assert_eq!(services[0]["name"], "Drone for Videography");

    let (status, body) = send(&app, "GET", "/api/services/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Drone for Agriculture");
    assert_eq!(body["price_per_hour"], 200.0);

    let (status, _) = send(&app, "GET", "/api/services/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/services/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid service ID");
}

// ─── Bookings ────────────────────────────────────────────────────

#[tokio::test]
async fn booking_lifecycle() {
    let app = app();
    let user_id = register_user(&app, "asha@example.com").await;
    let booking_id = create_booking(&app, user_id).await;

    let (status, body) = send(&app, "GET", &format!("/api/bookings/{booking_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
    // 3 hours of photoshoot at 120/h.
    assert_eq!(body["total_cost"], 360.0);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/bookings/{booking_id}"),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/bookings/{booking_id}"),
        Some(json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Status must be one of pending, confirmed, cancelled, completed"
    );

    let (status, body) = send(&app, "DELETE", &format!("/api/bookings/{booking_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");

    let (status, body) = send(&app, "GET", &format!("/api/bookings?user_id={user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);

    let (status, _) = send(&app, "GET", "/api/bookings/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_rejects_bad_input() {
    let app = app();
    let user_id = register_user(&app, "asha@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/bookings",
        Some(json!({
            "user_id": user_id,
            "service_id": 42,
            "location": "Pune",
            "booking_date": "2026-09-14",
            "time_slot": "morning",
            "duration_hours": 3,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/api/bookings",
        Some(json!({
            "user_id": user_id,
            "service_id": 2,
            "location": "Pune",
            "booking_date": "14-09-2026",
            "time_slot": "morning",
            "duration_hours": 3,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "booking_date must be YYYY-MM-DD");

    let (status, _) = send(
        &app,
        "POST",
        "/api/bookings",
        Some(json!({
            "user_id": user_id,
            "service_id": 2,
            "location": "Pune",
            "booking_date": "2026-09-14",
            "time_slot": "morning",
            "duration_hours": 0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─── Payment (mock) ──────────────────────────────────────────────

#[tokio::test]
async fn payment_flow_confirms_booking() {
    let app = app();
    let user_id = register_user(&app, "asha@example.com").await;
    let booking_id = create_booking(&app, user_id).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/payment/create-order",
        Some(json!({ "booking_id": booking_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], 360.0);
    assert_eq!(body["currency"], "INR");
    let order_id = body["order_id"].as_str().expect("order id").to_owned();

    let (status, body) = send(
        &app,
        "POST",
        "/api/payment/verify",
        Some(json!({
            "order_id": order_id,
            "payment_id": "pay_test_1",
            "signature": "sig_test",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["payment_id"], "pay_test_1");

    let (status, _) = send(
        &app,
        "POST",
        "/api/payment/verify",
        Some(json!({ "order_id": "order_missing", "payment_id": "p", "signature": "s" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/payment/verify",
        Some(json!({ "order_id": "", "payment_id": "", "signature": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─── Admin ───────────────────────────────────────────────────────

#[tokio::test]
async fn admin_lists_users_without_secrets() {
    let app = app();
    register_user(&app, "asha@example.com").await;

    let (status, body) = send(&app, "GET", "/api/admin/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["status"], "active");
    assert!(users[0].get("password_hash").is_none());

    let (status, body) = send(&app, "GET", "/api/admin/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("array").is_empty());
}

// ─── Monitoring ──────────────────────────────────────────────────

#[tokio::test]
async fn monitoring_report_covers_served_requests() {
    let app = app();

    // Traffic generated through the middleware path.
    send(&app, "GET", "/api/services", None).await;
    send(&app, "GET", "/api/services/99", None).await;

    let (status, body) = send(&app, "GET", "/api/monitoring/performance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window_ms"], 3_600_000);

    let perf = &body["performance"];
    assert!(perf["total_requests"].as_u64().expect("count") >= 2);
    assert!(perf["status_code_distribution"]["2xx"].as_u64().expect("2xx") >= 1);
    assert!(perf["status_code_distribution"]["4xx"].as_u64().expect("4xx") >= 1);
    let endpoints: Vec<&str> = perf["slowest_endpoints"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|e| e["endpoint"].as_str())
        .collect();
    assert!(endpoints.contains(&"GET /api/services"));
    assert!(endpoints.contains(&"GET /api/services/:id"));
}

#[tokio::test]
async fn monitoring_ingest_and_metric_selector() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/monitoring/performance",
        Some(json!({
            "type": "system",
            "cpuUsage": 45.5,
            "memoryUsage": 60.0,
            "diskUsage": 70.0,
            "activeConnections": 12,
            "requestsPerMinute": 300,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // Empty body records a zeroed request sample instead of failing.
    let (status, body) = send(&app, "POST", "/api/monitoring/performance", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(
        &app,
        "GET",
        "/api/monitoring/performance?metric=average_cpu_usage_pct",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(45.5));

    let (status, body) = send(
        &app,
        "GET",
        "/api/monitoring/performance?metric=peak_active_connections",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(12));

    let (status, body) = send(
        &app,
        "GET",
        "/api/monitoring/performance?metric=total_requests",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_u64().expect("count") >= 1);
}

#[tokio::test]
async fn monitoring_rejects_bad_parameters() {
    let app = app();

    let (status, body) = send(
        &app,
        "GET",
        "/api/monitoring/performance?metric=throughput",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Metric 'throughput' not found");

    let (status, body) = send(
        &app,
        "GET",
        "/api/monitoring/performance?window_ms=abc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "window_ms must be a non-negative integer");

    let (status, _) = send(
        &app,
        "GET",
        "/api/monitoring/performance?window_ms=-5",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A zero window is legal and simply matches nothing.
    let (status, body) = send(
        &app,
        "GET",
        "/api/monitoring/performance?window_ms=0&metric=total_requests",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(0));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
