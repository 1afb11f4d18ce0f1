use axum::http::{HeaderName, HeaderValue, Method};
use ladle_config::CorsConfig;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

const WILDCARD: &str = "*";

/// Build the CORS layer from validated settings.
///
/// `*` in any list means "any". With credentials enabled, wildcard methods
/// and headers mirror the request instead, since tower-http refuses to pair
/// credentials with `*`.
pub fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let wildcard_origin = cors.is_wildcard_included();
    let credentials = cors.allow_credentials && !wildcard_origin;
    if cors.allow_credentials && wildcard_origin {
        warn!("ignoring CORS credentials with wildcard origin");
    }

    let allow_origin = if wildcard_origin {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok()),
        )
    };

    let allow_methods = if contains_wildcard(&cors.allowed_methods) {
        if credentials {
            AllowMethods::mirror_request()
        } else {
            AllowMethods::any()
        }
    } else {
        AllowMethods::list(
            cors.allowed_methods
                .iter()
                .filter_map(|m| Method::from_bytes(m.as_bytes()).ok()),
        )
    };

    let allow_headers = if contains_wildcard(&cors.allowed_headers) {
        if credentials {
            AllowHeaders::mirror_request()
        } else {
            AllowHeaders::any()
        }
    } else {
        AllowHeaders::list(
            cors.allowed_headers
                .iter()
                .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allow_methods)
        .allow_headers(allow_headers)
        .allow_credentials(credentials)
}

fn contains_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value.trim() == WILDCARD)
}
