// SPDX-License-Identifier: MIT

//! Account registration route.

use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::password;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/signup", post(signup))
}

/// Registration request body.
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
}

/// Structural input checks, first violation wins (unlike the portfolio
/// validator, this path does not aggregate).
fn validate_signup(username: &str, email: &str, password: &str) -> Option<&'static str> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Some("All fields are required");
    }
    if password.chars().count() < password::MIN_PASSWORD_CHARS {
        return Some("Password must be at least 8 characters");
    }
    None
}

/// Register a new user identity.
///
/// Duplicate email and duplicate username are both conflict outcomes,
/// email checked first. The welcome mail is best-effort: its failure never
/// rolls back the created account.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    if let Some(msg) = validate_signup(&req.username, &req.email, &req.password) {
        return Err(AppError::Validation(msg.to_string()));
    }

    if state.db.find_user_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict(
            "User already exists with this email".to_string(),
        ));
    }

    if state.db.get_user(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User {
        username: req.username,
        email: req.email,
        password_hash,
        is_verified: true, // no OTP step; accounts are active immediately
        is_accepting_messages: true,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    state.db.create_user(&user).await?;

    tracing::info!(username = %user.username, "User registered");

    if let Err(e) = state.mailer.send_welcome(&user.email, &user.username).await {
        tracing::warn!(error = %e, username = %user.username, "Failed to send welcome email");
    }

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: "User registered successfully. Welcome to Codelio!".to_string(),
        }),
    ))
}
