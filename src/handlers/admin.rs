//! Admin dashboard listings. Like the rest of the platform these are
//! unauthenticated for now; a real deployment would gate them.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::store::{Booking, SafeUser};
use crate::AppState;

// ─── GET /api/admin/users ────────────────────────────────────────

pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<SafeUser>> {
    let users = state.store.users();
    Json(users.iter().map(SafeUser::from).collect())
}

// ─── GET /api/admin/bookings ─────────────────────────────────────

pub async fn list_bookings(State(state): State<Arc<AppState>>) -> Json<Vec<Booking>> {
    Json(state.store.bookings())
}
