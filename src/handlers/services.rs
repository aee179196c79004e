use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::store::Service;
use crate::AppState;

use super::{parse_id, AppError};

// ─── GET /api/services ───────────────────────────────────────────

pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.store.active_services())
}

// ─── GET /api/services/:id ───────────────────────────────────────

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Service>, AppError> {
    let id = parse_id(&id, "service")?;
    let service = state
        .store
        .service(id)
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
    Ok(Json(service))
}
