//! Rate limiting middleware using governor
//!
//! A single global limiter shared by every request. The quota refills
//! evenly across the window and allows bursts up to the full allowance.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use edudir_core::config::RateLimitSettings;
use edudir_core::{EdudirError, Result};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Duration};

/// Rate limiter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum number of requests per window
    pub max_requests: u32,
    /// Time window duration in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    /// Creates a new rate limit configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use edudir_serve::middleware::rate_limit::RateLimitConfig;
    ///
    /// let config = RateLimitConfig::new(100, 60);
    /// assert_eq!(config.max_requests, 100);
    /// assert_eq!(config.window_seconds, 60);
    /// ```
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }
}

impl From<&RateLimitSettings> for RateLimitConfig {
    fn from(settings: &RateLimitSettings) -> Self {
        Self::new(settings.max_requests, settings.window_seconds)
    }
}

/// Rate limiter state shared across requests
pub type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Creates a new rate limiter from configuration
///
/// # Errors
///
/// Returns `EdudirError::Validation` when either value is zero.
///
/// # Examples
///
/// ```
/// use edudir_serve::middleware::rate_limit::{create_rate_limiter, RateLimitConfig};
///
/// let limiter = create_rate_limiter(&RateLimitConfig::default()).unwrap();
/// assert!(limiter.check().is_ok());
/// assert!(create_rate_limiter(&RateLimitConfig::new(0, 60)).is_err());
/// ```
pub fn create_rate_limiter(config: &RateLimitConfig) -> Result<SharedRateLimiter> {
    let burst = NonZeroU32::new(config.max_requests)
        .ok_or_else(|| EdudirError::validation("rate limit max_requests must be non-zero"))?;

    let window = Duration::from_secs(config.window_seconds);
    let period = window / config.max_requests;
    let quota = Quota::with_period(period)
        .ok_or_else(|| EdudirError::validation("rate limit window must be non-zero"))?
        .allow_burst(burst);

    Ok(Arc::new(RateLimiter::direct(quota)))
}

/// Rate limiting middleware
///
/// Rejects requests over the limit with `429` and a `retry-after` header.
///
/// # Examples
///
/// ```no_run
/// use axum::{middleware, Router};
/// use edudir_serve::middleware::rate_limit::{
///     create_rate_limiter, rate_limit_middleware, RateLimitConfig,
/// };
///
/// let limiter = create_rate_limiter(&RateLimitConfig::default()).unwrap();
/// let app: Router = Router::new()
///     .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
/// ```
pub async fn rate_limit_middleware(
    State(limiter): State<SharedRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    match limiter.check() {
        Ok(_) => next.run(request).await,
        Err(not_until) => {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            // Round up so clients never retry early
            let retry_after = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);

            tracing::warn!(retry_after = retry_after, "Rate limit exceeded");

            (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("retry-after", retry_after.to_string()),
                    ("x-ratelimit-remaining", "0".to_string()),
                ],
                axum::Json(serde_json::json!({ "error": "Too many requests" })),
            )
                .into_response()
        }
    }
}
