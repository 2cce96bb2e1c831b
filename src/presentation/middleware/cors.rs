//! CORS Middleware Configuration

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Create CORS layer from settings
///
/// A `*` entry, or no parseable origin at all, allows any origin.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins = parse_origins(&settings.allowed_origins);

    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    match origins {
        Some(origins) => layer.allow_origin(origins),
        None => layer.allow_origin(Any),
    }
}

fn parse_origins(configured: &[String]) -> Option<Vec<HeaderValue>> {
    if configured.iter().any(|o| o.trim() == "*") {
        return None;
    }
    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    (!origins.is_empty()).then_some(origins)
}
