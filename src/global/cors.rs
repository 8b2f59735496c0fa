use axum::http::{header, HeaderName, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::middleware::REQUEST_ID_HEADER;
use crate::config::AllowedOrigins;

/// Build the CORS layer from configuration.
///
/// `Any` mirrors the permissive development setup (every origin, method and header).
pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    match origins {
        AllowedOrigins::Any => CorsLayer::permissive(),
        AllowedOrigins::List(list) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(list.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
            .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]),
    }
}
