use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::store::{NewUser, SafeUser, UserStatus};
use crate::validation::{sanitize_input, validate_email, validate_name, validate_phone};
use crate::AppState;

use super::AppError;

// ─── POST /api/auth/register ─────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(alias = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let full_name = sanitize_input(&req.full_name);
    let email = sanitize_input(&req.email);
    let phone = sanitize_input(&req.phone);
    let password = req.password;

    if full_name.is_empty() || email.is_empty() || phone.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("All fields are required".into()));
    }
    if !validate_name(&full_name) {
        return Err(AppError::BadRequest(
            "Full name must be between 2 and 50 characters".into(),
        ));
    }
    if !validate_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".into(),
        ));
    }
    if !validate_phone(&phone) {
        return Err(AppError::BadRequest(
            "Please enter a valid phone number".into(),
        ));
    }
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters long".into(),
        ));
    }

    if state.store.user_by_email(&email).is_some() {
        return Err(AppError::Conflict(
            "User with this email already exists".into(),
        ));
    }

    let user = state.store.create_user(NewUser {
        full_name,
        email,
        phone,
        password_hash: auth::hash_password(&password),
    });

    // Mail delivery is out of scope; the verification token only hits
    // the log.
    let verification_token = auth::generate_token(auth::TOKEN_BYTES);
    tracing::debug!(email = %user.email, token = %verification_token, "verification token issued");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration successful. Please check your email for verification.",
            "data": SafeUser::from(&user),
        })),
    ))
}

// ─── POST /api/auth/login ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let email = sanitize_input(&req.email);
    if !validate_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".into(),
        ));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".into()));
    }

    // One message for both unknown user and wrong password.
    let invalid = || AppError::Unauthorized("Invalid email or password".into());

    let user = state.store.user_by_email(&email).ok_or_else(invalid)?;
    if user.status != UserStatus::Active {
        return Err(AppError::Forbidden("Account is not active".into()));
    }
    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    if !auth::verify_password(&req.password, hash) {
        return Err(invalid());
    }

    let user = state.store.record_login(user.id).unwrap_or(user);
    let token = auth::issue_jwt(user.id, &user.email, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(format!("token generation failed: {e}")))?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": SafeUser::from(&user),
    })))
}

// ─── POST /api/auth/forgot-password ──────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let email = sanitize_input(&req.email);
    if !validate_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".into(),
        ));
    }

    // Same response either way so the endpoint does not leak which
    // addresses have accounts.
    if let Some(user) = state.store.user_by_email(&email) {
        let reset_token = auth::generate_token(auth::TOKEN_BYTES);
        tracing::debug!(email = %user.email, token = %reset_token, "password reset token issued");
    }

    Ok(Json(json!({
        "success": true,
        "message": "If an account with this email exists, you will receive a password reset link.",
    })))
}
