// SPDX-License-Identifier: MIT

//! Portfolio CRUD routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{PortfolioRecord, PortfolioView};
use crate::schema::{PortfolioDraft, PortfolioPatch};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Portfolio routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/portfolio",
            get(get_portfolio)
                .post(save_portfolio)
                .patch(update_portfolio)
                .delete(delete_portfolio),
        )
        .route("/api/portfolio/view", get(get_portfolio_view))
}

/// Portfolio operation response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PortfolioResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PortfolioRecord>,
}

fn not_found() -> AppError {
    AppError::NotFound("Portfolio not found".to_string())
}

/// Get the authenticated user's portfolio record.
async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PortfolioResponse>> {
    let record = state
        .db
        .get_portfolio(&user.username)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(PortfolioResponse {
        success: true,
        message: None,
        data: Some(record),
    }))
}

/// Create or fully replace the authenticated user's portfolio (replace mode).
async fn save_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<PortfolioDraft>,
) -> Result<Json<PortfolioResponse>> {
    let record = draft.validate()?;
    let saved = state.db.upsert_portfolio(&user.username, &record).await?;

    tracing::debug!(
        username = %user.username,
        projects = saved.projects.len(),
        "Portfolio saved"
    );

    Ok(Json(PortfolioResponse {
        success: true,
        message: Some("Portfolio saved successfully".to_string()),
        data: Some(saved),
    }))
}

/// Merge a partial update into the existing record (patch mode).
///
/// Fails with 404 when no record exists; a patch never implicitly creates.
async fn update_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(patch): Json<PortfolioPatch>,
) -> Result<Json<PortfolioResponse>> {
    patch.validate()?;
    let updated = state.db.patch_portfolio(&user.username, patch).await?;

    tracing::debug!(username = %user.username, "Portfolio updated");

    Ok(Json(PortfolioResponse {
        success: true,
        message: Some("Portfolio updated successfully".to_string()),
        data: Some(updated),
    }))
}

/// Delete the authenticated user's portfolio record.
async fn delete_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PortfolioResponse>> {
    state.db.delete_portfolio(&user.username).await?;

    tracing::info!(username = %user.username, "Portfolio deleted");

    Ok(Json(PortfolioResponse {
        success: true,
        message: Some("Portfolio deleted successfully".to_string()),
        data: None,
    }))
}

/// Get the display projection of the stored record (stat cards + accordion
/// rows), ready for the portfolio page.
async fn get_portfolio_view(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PortfolioView>> {
    let record = state
        .db
        .get_portfolio(&user.username)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(PortfolioView::from_record(&record)))
}
