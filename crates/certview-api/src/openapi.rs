//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI 3.1
//! document served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "certview API",
        version = "0.1.0",
        description = "Read-only certificate listing, lookup by student and event, slug resolution, and statistics.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::index::banner,
        crate::routes::certificates::list_certificates,
        crate::routes::certificates::list_for_student,
        crate::routes::certificates::find_certificate,
        crate::routes::certificates::resolve_certificate,
        crate::routes::stats::get_stats,
    ),
    components(schemas(
        certview_core::Certificate,
        certview_core::VerificationMetadata,
        certview_core::CertificateStats,
        crate::routes::index::ServiceBanner,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "index", description = "Service banner"),
        (name = "certificates", description = "Certificate listing and lookup"),
        (name = "stats", description = "Aggregate statistics"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
