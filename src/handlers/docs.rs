use axum::{extract::Query, Json};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppError;

/// Static API description served at `/api/docs`.
static API_DOCS: Lazy<Value> = Lazy::new(|| {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "title": "SkyVision API Documentation",
        "description": "API documentation for the drone booking platform",
        "endpoints": {
            "authentication": {
                "register": { "method": "POST", "path": "/api/auth/register",
                    "parameters": { "full_name": "string (required)", "email": "string (required)",
                                    "phone": "string (required)", "password": "string (required, min 8 chars)" } },
                "login": { "method": "POST", "path": "/api/auth/login",
                    "parameters": { "email": "string (required)", "password": "string (required)" },
                    "response": { "success": "boolean", "token": "string", "user": "User object" } },
                "forgot_password": { "method": "POST", "path": "/api/auth/forgot-password",
                    "parameters": { "email": "string (required)" } },
            },
            "services": {
                "list": { "method": "GET", "path": "/api/services" },
                "details": { "method": "GET", "path": "/api/services/{id}" },
            },
            "bookings": {
                "create": { "method": "POST", "path": "/api/bookings",
                    "parameters": { "user_id": "number (required)", "service_id": "number (required)",
                                    "location": "string (required)", "booking_date": "string (required, YYYY-MM-DD)",
                                    "time_slot": "string (required)", "duration_hours": "number (required)",
                                    "custom_needs": "string (optional)" } },
                "list": { "method": "GET", "path": "/api/bookings",
                    "parameters": { "user_id": "number (optional)" } },
                "details": { "method": "GET", "path": "/api/bookings/{id}" },
                "update": { "method": "PUT", "path": "/api/bookings/{id}",
                    "parameters": { "status": "string (required, pending|confirmed|cancelled|completed)" } },
                "cancel": { "method": "DELETE", "path": "/api/bookings/{id}" },
            },
            "payment": {
                "create_order": { "method": "POST", "path": "/api/payment/create-order",
                    "parameters": { "booking_id": "number (required)", "currency": "string (optional, default: INR)" } },
                "verify": { "method": "POST", "path": "/api/payment/verify",
                    "parameters": { "order_id": "string (required)", "payment_id": "string (required)",
                                    "signature": "string (required)" } },
            },
            "admin": {
                "users": { "method": "GET", "path": "/api/admin/users" },
                "bookings": { "method": "GET", "path": "/api/admin/bookings" },
            },
            "monitoring": {
                "performance": { "method": "GET", "path": "/api/monitoring/performance",
                    "parameters": { "window_ms": "number (optional, default 3600000)",
                                    "metric": "string (optional, a report field name)" } },
                "record": { "method": "POST", "path": "/api/monitoring/performance",
                    "parameters": { "type": "string (optional, \"system\" for resource samples)" } },
                "stream": { "method": "GET", "path": "/api/monitoring/stream" },
            },
            "health": { "method": "GET", "path": "/api/health" },
        },
        "error_codes": {
            "400": "Bad Request - Invalid parameters",
            "401": "Unauthorized - Authentication required",
            "403": "Forbidden - Insufficient permissions",
            "404": "Not Found - Resource not found",
            "409": "Conflict - Resource already exists",
            "500": "Internal Server Error - Server error",
        },
    })
});

#[derive(Debug, Default, Deserialize)]
pub struct DocsQuery {
    pub section: Option<String>,
}

// ─── GET /api/docs ───────────────────────────────────────────────

pub async fn get_docs(Query(query): Query<DocsQuery>) -> Result<Json<Value>, AppError> {
    match query.section.as_deref() {
        Some(section) => {
            let data = API_DOCS
                .get(section)
                .ok_or_else(|| AppError::NotFound("Section not found".into()))?;
            Ok(Json(data.clone()))
        }
        None => Ok(Json(API_DOCS.clone())),
    }
}
