//! Middleware module for the Edudir serve crate
//!
//! Request tracking, security headers, CORS and global rate limiting.

pub mod rate_limit;
pub mod request;
pub mod security;

pub use rate_limit::{create_rate_limiter, rate_limit_middleware, RateLimitConfig, SharedRateLimiter};
pub use request::{request_id_middleware, timing_middleware, REQUEST_ID_HEADER};
pub use security::{cors_layer, security_headers_middleware};
