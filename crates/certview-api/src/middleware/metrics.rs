//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded here
//! through the `metrics` facade. The store gauge is refreshed on each
//! `/metrics` scrape (pull model); see the metrics handler in `lib.rs`.
//!
//! With no recorder installed every macro is a no-op, so tests and
//! `CERTVIEW_METRICS_ENABLED=false` pay nothing.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Total HTTP requests, by method, route and status.
pub const HTTP_REQUESTS_TOTAL: &str = "certview_http_requests_total";
/// Request latency in seconds, by method and route.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "certview_http_request_duration_seconds";
/// 4xx and 5xx responses, by method, route and status.
pub const HTTP_ERRORS_TOTAL: &str = "certview_http_errors_total";
/// Number of stored certificates.
pub const CERTIFICATES_TOTAL: &str = "certview_certificates_total";

/// Label used for requests that matched no route.
const UNMATCHED: &str = "unmatched";

/// Register metric descriptions with the installed recorder.
pub fn describe() {
    metrics::describe_counter!(HTTP_REQUESTS_TOTAL, "Total HTTP requests");
    metrics::describe_histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "HTTP request duration in seconds"
    );
    metrics::describe_counter!(HTTP_ERRORS_TOTAL, "Total HTTP errors (4xx and 5xx)");
    metrics::describe_gauge!(CERTIFICATES_TOTAL, "Certificates in the store");
}

/// Middleware that records request count, latency and errors.
///
/// The `path` label is the matched route template (`/api/certificates/{srn}/{eventName}`),
/// never the raw URI, so label cardinality stays bounded.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = start.elapsed().as_secs_f64();
    let status_label = status.as_u16().to_string();

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status_label.clone()
    )
    .increment(1);
    metrics::histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(elapsed);

    if status.is_client_error() || status.is_server_error() {
        metrics::counter!(
            HTTP_ERRORS_TOTAL,
            "method" => method,
            "path" => path,
            "status" => status_label
        )
        .increment(1);
    }

    response
}

/// Set the store gauge.
pub fn record_certificate_count(count: u64) {
    metrics::gauge!(CERTIFICATES_TOTAL).set(count as f64);
}
