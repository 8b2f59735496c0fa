//! Request tracing middleware for observability.
//!
//! Every request gets a request id (echoed from the client when present), a tracing
//! span, start/completion logs and HTTP metrics.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Request ID header name for distributed tracing
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that adds request tracing with a request ID.
pub async fn request_tracing(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && value.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        tracing::info!("Request started");
        let start = Instant::now();

        let mut response = next.run(request).await;

        let duration = start.elapsed();
        let status = response.status();

        tracing::info!(
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );

        record_request_metrics(method.as_ref(), &path, status.as_u16(), duration);

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Record metrics for HTTP requests
fn record_request_metrics(method: &str, path: &str, status: u16, duration: Duration) {
    let status_str = status.to_string();
    let path = normalize_path(path);

    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.clone(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path,
        "status" => status_str
    )
    .record(duration.as_secs_f64());
}

/// Normalize path for metrics to avoid high cardinality
///
/// Static assets collapse into `/assets`, everything else keeps its first two segments.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => "/".to_string(),
        ["assets", ..] => "/assets".to_string(),
        [first] => format!("/{}", first),
        [first, second, ..] => format!("/{}/{}", first, second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_short() {
        assert_eq!(normalize_path("/health"), "/health");
        assert_eq!(normalize_path("/refine"), "/refine");
        assert_eq!(normalize_path("/api/professionalize"), "/api/professionalize");
    }

    #[test]
    fn test_normalize_path_long() {
        assert_eq!(normalize_path("/swagger-ui/index.html/extra"), "/swagger-ui/index.html");
    }

    #[test]
    fn test_normalize_path_assets() {
        assert_eq!(normalize_path("/assets/index-4f2a.js"), "/assets");
    }

    #[test]
    fn test_normalize_path_root() {
        assert_eq!(normalize_path("/"), "/");
    }
}
