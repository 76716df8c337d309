//! # Service Index
//!
//! The root banner and the JSON 404 for unknown paths.

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorBody, ErrorDetail};
use crate::state::AppState;

/// Routes listed in the unknown-path response.
pub const AVAILABLE_ROUTES: &[&str] = &[
    "GET /",
    "GET /api/certificates",
    "GET /api/certificates/student/{srn}",
    "GET /api/certificates/{srn}/{eventName}",
    "GET /api/resolve/{srn}/{slug}",
    "GET /api/stats",
    "GET /health/liveness",
    "GET /health/readiness",
    "GET /openapi.json",
];

/// Root banner.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceBanner {
    pub message: &'static str,
}

/// Build the index router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(banner))
}

/// GET / — Confirms the service is up.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = ServiceBanner)),
    tag = "index"
)]
pub(crate) async fn banner() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        message: "certview API is running",
    })
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    let body = ErrorBody {
        error: ErrorDetail {
            code: "NOT_FOUND".to_string(),
            message: format!("Route not found: {}", uri.path()),
            details: Some(serde_json::json!({ "availableRoutes": AVAILABLE_ROUTES })),
        },
    };
    (StatusCode::NOT_FOUND, Json(body))
}
