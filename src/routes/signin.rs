// SPDX-License-Identifier: MIT

//! Session routes: credential sign-in and logout.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::services::password;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/signin", post(signin))
        .route("/api/logout", post(logout))
}

#[derive(Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SigninResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Verify credentials and mint a session token.
///
/// A missing user and a wrong password are indistinguishable to the caller.
async fn signin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<SigninRequest>,
) -> Result<(CookieJar, Json<SigninResponse>)> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    let user = state
        .db
        .get_user(&req.username)
        .await?
        .filter(|u| password::verify_password(&req.password, &u.password_hash))
        .ok_or(AppError::Unauthorized)?;

    let token = create_jwt(&user.username, &state.config.jwt_signing_key)?;

    tracing::info!(username = %user.username, "User signed in");

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(SigninResponse {
            success: true,
            message: "Signed in successfully".to_string(),
            token: Some(token),
        }),
    ))
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<SigninResponse>) {
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (
        jar.remove(removal),
        Json(SigninResponse {
            success: true,
            message: "Signed out".to_string(),
            token: None,
        }),
    )
}
