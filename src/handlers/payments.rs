//! Mock checkout. There is no gateway behind these endpoints: creating
//! an order reserves an id for a booking's total, verifying one flips
//! the booking to confirmed. Real payment integration is deliberately
//! out of scope.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::store::BookingStatus;
use crate::AppState;

use super::AppError;

// ─── POST /api/payment/create-order ──────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(alias = "bookingId")]
    pub booking_id: u64,
    #[serde(default)]
    pub currency: Option<String>,
}

pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking = state
        .store
        .booking(req.booking_id)
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::BadRequest(
            "Cannot create an order for a cancelled booking".into(),
        ));
    }

    let order_id = format!("order_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let currency = req.currency.unwrap_or_else(|| "INR".into());
    let order = state
        .store
        .create_order(order_id, booking.id, booking.total_cost, currency);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "order_id": order.id,
            "amount": order.amount,
            "currency": order.currency,
        })),
    ))
}

// ─── POST /api/payment/verify ────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyPaymentRequest {
    #[serde(alias = "orderId")]
    pub order_id: String,
    #[serde(alias = "paymentId")]
    pub payment_id: String,
    pub signature: String,
}

pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    if req.order_id.is_empty() || req.payment_id.is_empty() || req.signature.is_empty() {
        return Err(AppError::BadRequest(
            "order_id, payment_id and signature are required".into(),
        ));
    }

    let order = state
        .store
        .order(&req.order_id)
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

    state.store.mark_order_paid(&order.id);
    let booking = state
        .store
        .attach_payment(order.booking_id, "razorpay", &req.payment_id)
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Payment verified successfully",
        "data": booking,
    })))
}
