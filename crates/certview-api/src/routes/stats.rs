//! # Statistics API

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use certview_core::CertificateStats;

use crate::error::AppError;
use crate::state::AppState;

/// Build the statistics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}

/// GET /api/stats — Totals, distinct students and events, and the most recent certificates.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Aggregate statistics", body = CertificateStats),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "stats"
)]
pub(crate) async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<CertificateStats>, AppError> {
    let stats = state
        .certificates
        .stats()
        .await
        .map_err(AppError::store("Failed to fetch statistics"))?;
    Ok(Json(stats))
}
