//! # certview-api — Certificate Lookup Service
//!
//! Read-only HTTP API over the certificate store.
//!
//! ## API Surface
//!
//! | Prefix | Module | Domain |
//! |---|---|---|
//! | `/` | [`routes::index`] | Banner |
//! | `/api/certificates/*` | [`routes::certificates`] | Listing and lookup |
//! | `/api/resolve/*` | [`routes::certificates`] | Slug resolution |
//! | `/api/stats` | [`routes::stats`] | Statistics |
//! | `/health/*` | this module | Probes |
//! | `/metrics` | this module | Prometheus scrape |
//! | `/openapi.json` | [`openapi`] | OpenAPI 3.1 document |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.config.metrics_enabled;
    let cors = cors_layer(&state.config.allowed_origins);

    let mut router = Router::new()
        .merge(routes::index::router())
        .merge(routes::certificates::router())
        .merge(routes::stats::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    if metrics_on {
        router = router.route("/metrics", get(prometheus_metrics));
    }

    let mut router = router.fallback(routes::index::not_found);

    if metrics_on {
        router = router.layer(from_fn(middleware::metrics::metrics_middleware));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for browser clients: read-only methods from the configured origins.
///
/// Origins that are not valid header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Refreshes the store gauge, then renders every recorded metric in
/// Prometheus text exposition format.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let Some(handle) = &state.metrics else {
        return (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response();
    };

    match state.certificates.count().await {
        Ok(count) => middleware::metrics::record_certificate_count(count),
        Err(e) => tracing::warn!("Failed to refresh certificate gauge: {e}"),
    }

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
        .into_response()
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the store can answer queries.
///
/// With PostgreSQL this establishes the pool if no request has yet.
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.certificates.check_ready().await {
        tracing::warn!("Store health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "store unreachable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
