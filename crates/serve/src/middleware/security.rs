//! Security middleware for the Edudir serve crate
//!
//! Response hardening headers and the CORS policy for the public read API.

use axum::{
    extract::Request,
    http::{header::HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

/// Security headers middleware
///
/// Adds hardening headers to every response.
///
/// # Security Headers
///
/// - X-Content-Type-Options: Prevents MIME type sniffing
/// - X-Frame-Options: Prevents clickjacking
/// - Strict-Transport-Security: Enforces HTTPS
/// - Content-Security-Policy: Nothing to load, nothing to frame
/// - Referrer-Policy: Controls referrer information
///
/// # Examples
///
/// ```no_run
/// use axum::{Router, middleware};
/// use edudir_serve::middleware::security::security_headers_middleware;
///
/// let app: Router = Router::new()
///     .layer(middleware::from_fn(security_headers_middleware));
/// ```
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "strict-transport-security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    // JSON only, so nothing may be loaded or framed
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

/// CORS layer for the read API
///
/// Any origin may call the GET and POST endpoints; credentials are never
/// allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(86400))
}
