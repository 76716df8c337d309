//! # Certificate Lookup API
//!
//! Read-only listing and lookup. There is no write path: certificates are
//! inserted by an external process.
//!
//! `/api/certificates/student/{srn}` takes precedence over the two-segment
//! lookup, so a student whose identifier is literally `student` can list
//! their certificates but not look one up by event.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use certview_core::{Certificate, CertificateAddress};

use crate::error::AppError;
use crate::state::AppState;

const LIST_FAILED: &str = "Failed to fetch certificates";
const LOOKUP_FAILED: &str = "Failed to fetch certificate";

/// Build the certificates router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/certificates", get(list_certificates))
        .route("/api/certificates/student/{srn}", get(list_for_student))
        .route("/api/certificates/{srn}/{eventName}", get(find_certificate))
        .route("/api/resolve/{srn}/{slug}", get(resolve_certificate))
}

/// GET /api/certificates — Every certificate, newest first.
#[utoipa::path(
    get,
    path = "/api/certificates",
    responses(
        (status = 200, description = "All certificates, newest first", body = Vec<Certificate>),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "certificates"
)]
pub(crate) async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let records = state
        .certificates
        .list_all()
        .await
        .map_err(AppError::store(LIST_FAILED))?;
    Ok(Json(records))
}

/// GET /api/certificates/student/{srn} — One student's certificates, newest first.
#[utoipa::path(
    get,
    path = "/api/certificates/student/{srn}",
    params(("srn" = String, Path, description = "Student registration number, matched exactly")),
    responses(
        (status = 200, description = "The student's certificates, possibly empty", body = Vec<Certificate>),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "certificates"
)]
pub(crate) async fn list_for_student(
    State(state): State<AppState>,
    Path(srn): Path<String>,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let records = state
        .certificates
        .list_by_srn(&srn)
        .await
        .map_err(AppError::store(LIST_FAILED))?;
    Ok(Json(records))
}

/// GET /api/certificates/{srn}/{eventName} — Look up one certificate.
///
/// The event segment matches case-insensitively and ignores whitespace in
/// both the query and the stored name.
#[utoipa::path(
    get,
    path = "/api/certificates/{srn}/{eventName}",
    params(
        ("srn" = String, Path, description = "Student registration number, matched exactly"),
        ("eventName" = String, Path, description = "Event name or fragment, whitespace and case ignored"),
    ),
    responses(
        (status = 200, description = "The first matching certificate", body = Certificate),
        (status = 404, description = "No certificate matches", body = crate::error::ErrorBody),
        (status = 422, description = "Blank student id or event", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "certificates"
)]
pub(crate) async fn find_certificate(
    State(state): State<AppState>,
    Path((srn, event_name)): Path<(String, String)>,
) -> Result<Json<Certificate>, AppError> {
    state
        .certificates
        .find_by_event(&srn, &event_name)
        .await
        .map_err(AppError::store(LOOKUP_FAILED))?
        .map(Json)
        .ok_or_else(AppError::certificate_not_found)
}

/// GET /api/resolve/{srn}/{slug} — Resolve a shareable certificate address.
///
/// Matches the slug exactly against each event name with whitespace removed
/// and lower-cased.
#[utoipa::path(
    get,
    path = "/api/resolve/{srn}/{slug}",
    params(
        ("srn" = String, Path, description = "Student registration number, matched exactly"),
        ("slug" = String, Path, description = "Event slug, e.g. `codefest2025`"),
    ),
    responses(
        (status = 200, description = "The certificate at this address", body = Certificate),
        (status = 404, description = "No certificate at this address", body = crate::error::ErrorBody),
        (status = 422, description = "Blank student id or slug", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "certificates"
)]
pub(crate) async fn resolve_certificate(
    State(state): State<AppState>,
    Path((srn, slug)): Path<(String, String)>,
) -> Result<Json<Certificate>, AppError> {
    let address = CertificateAddress::new(Some(&srn), Some(&slug))?;
    tracing::debug!(%address, "resolving certificate");
    state
        .certificates
        .resolve(&address)
        .await
        .map_err(AppError::store(LOOKUP_FAILED))?
        .map(Json)
        .ok_or_else(AppError::certificate_not_found)
}
