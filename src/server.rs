use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::middleware::telemetry;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Authentication ──────────────────────────────────────
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route(
            "/api/auth/forgot-password",
            post(handlers::auth::forgot_password),
        )
        // ── Services ────────────────────────────────────────────
        .route("/api/services", get(handlers::services::list_services))
        .route("/api/services/:id", get(handlers::services::get_service))
        // ── Bookings ────────────────────────────────────────────
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::cancel_booking),
        )
        // ── Payment (mock) ──────────────────────────────────────
        .route(
            "/api/payment/create-order",
            post(handlers::payments::create_order),
        )
        .route("/api/payment/verify", post(handlers::payments::verify_payment))
        // ── Admin ───────────────────────────────────────────────
        .route("/api/admin/users", get(handlers::admin::list_users))
        .route("/api/admin/bookings", get(handlers::admin::list_bookings))
        // ── Monitoring ──────────────────────────────────────────
        .route(
            "/api/monitoring/performance",
            get(handlers::monitoring::get_performance)
                .post(handlers::monitoring::record_sample),
        )
        .route(
            "/api/monitoring/stream",
            get(handlers::monitoring::monitoring_stream),
        )
        // ── Operational ─────────────────────────────────────────
        .route("/api/health", get(handlers::health::health))
        .route("/api/docs", get(handlers::docs::get_docs))
        // ── Provide shared state to all routes above ────────────
        .with_state(state.clone())
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn_with_state(
            state,
            telemetry::telemetry_middleware,
        ))
        .layer(CorsLayer::permissive())
}
