//! Response caching for read endpoints
//!
//! Stores the exact JSON body produced for a request so a hit is
//! byte-identical to recomputing it. Entries expire a fixed time after they
//! are written; reads do not extend their life.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use edudir_core::config::CacheSettings;
use moka::future::Cache;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Cache key for a read request
///
/// Each variant carries every parameter that influences the response, so two
/// distinct requests can never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseCacheKey {
    /// `POST /colleges/search`
    Search {
        keyword: String,
        page: usize,
        limit: usize,
    },
    /// `GET /colleges/state/:state`
    State {
        state: String,
        page: usize,
        limit: usize,
    },
    /// `GET /colleges/district/:district`
    District {
        district: String,
        page: usize,
        limit: usize,
    },
    /// `GET /allstates`
    AllStates,
    /// `GET /districts/:state`
    Districts { state: String },
}

impl fmt::Display for ResponseCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search {
                keyword,
                page,
                limit,
            } => write!(f, "search:{}:{}:{}", keyword, page, limit),
            Self::State { state, page, limit } => write!(f, "state:{}:{}:{}", state, page, limit),
            Self::District {
                district,
                page,
                limit,
            } => write!(f, "district:{}:{}:{}", district, page, limit),
            Self::AllStates => f.write_str("allStates"),
            Self::Districts { state } => write!(f, "districts:{}", state),
        }
    }
}

impl ResponseCacheKey {
    /// Approximate bytes the key occupies, dominated by its string parameter
    pub fn weight(&self) -> usize {
        let text = match self {
            Self::Search { keyword, .. } => keyword.len(),
            Self::State { state, .. } | Self::Districts { state } => state.len(),
            Self::District { district, .. } => district.len(),
            Self::AllStates => 0,
        };
        text + std::mem::size_of::<Self>()
    }
}

/// A serialized response body held by the cache
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// JSON body exactly as first sent
    pub body: Arc<str>,
}

impl CachedResponse {
    /// Wrap a serialized JSON body
    ///
    /// # Examples
    ///
    /// ```
    /// use edudir_serve::cache::CachedResponse;
    ///
    /// let response = CachedResponse::new("{\"total\":3}".to_string());
    /// assert_eq!(&*response.body, "{\"total\":3}");
    /// ```
    pub fn new(body: String) -> Self {
        Self {
            body: Arc::from(body),
        }
    }
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, "application/json")],
            self.body.to_string(),
        )
            .into_response()
    }
}

/// Response cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCacheConfig {
    /// Maximum total weight of keys plus bodies, in bytes
    pub max_bytes: u64,
    /// Time to live for cache entries in seconds
    pub ttl_seconds: u64,
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: 64 * 1024 * 1024,
            ttl_seconds: 600,
        }
    }
}

impl ResponseCacheConfig {
    /// Creates a new cache configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use edudir_serve::cache::ResponseCacheConfig;
    ///
    /// let config = ResponseCacheConfig::new(4096, 60);
    /// assert_eq!(config.max_bytes, 4096);
    /// assert_eq!(config.ttl_seconds, 60);
    /// ```
    pub fn new(max_bytes: u64, ttl_seconds: u64) -> Self {
        Self {
            max_bytes,
            ttl_seconds,
        }
    }
}

impl From<&CacheSettings> for ResponseCacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self::new(settings.max_bytes, settings.ttl_seconds)
    }
}

/// In-memory TTL cache of response bodies
pub struct ResponseCache {
    cache: Cache<ResponseCacheKey, CachedResponse>,
    config: ResponseCacheConfig,
}

impl ResponseCache {
    /// Creates a new response cache
    ///
    /// # Examples
    ///
    /// ```
    /// use edudir_serve::cache::{ResponseCache, ResponseCacheConfig};
    ///
    /// let cache = ResponseCache::new(ResponseCacheConfig::default());
    /// assert_eq!(cache.entry_count(), 0);
    /// ```
    pub fn new(config: ResponseCacheConfig) -> Self {
        let cache = Cache::builder()
            .weigher(entry_weight)
            .max_capacity(config.max_bytes)
            .time_to_live(Duration::from_secs(config.ttl_seconds))
            .build();

        Self { cache, config }
    }

    /// Gets a cached response if present and not expired
    ///
    /// # Examples
    ///
    /// ```
    /// use edudir_serve::cache::{ResponseCache, ResponseCacheConfig, ResponseCacheKey};
    ///
    /// # tokio_test::block_on(async {
    /// let cache = ResponseCache::new(ResponseCacheConfig::default());
    /// assert!(cache.get(&ResponseCacheKey::AllStates).await.is_none());
    /// # });
    /// ```
    pub async fn get(&self, key: &ResponseCacheKey) -> Option<CachedResponse> {
        let hit = self.cache.get(key).await;
        tracing::debug!(key = %key, hit = hit.is_some(), "Response cache lookup");
        hit
    }

    /// Stores a response, replacing any previous entry for the key
    pub async fn set(&self, key: ResponseCacheKey, response: CachedResponse) {
        tracing::debug!(key = %key, "Response cache store");
        self.cache.insert(key, response).await;
    }

    /// Number of entries currently held
    ///
    /// Moka updates this lazily, so it can lag just after inserts.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Bytes currently charged against `max_bytes`
    pub fn weighted_size(&self) -> u64 {
        self.cache.weighted_size()
    }

    /// Flush pending housekeeping so counts and expiry are current
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Gets the cache configuration
    pub fn config(&self) -> &ResponseCacheConfig {
        &self.config
    }
}

fn entry_weight(key: &ResponseCacheKey, value: &CachedResponse) -> u32 {
    u32::try_from(key.weight() + value.body.len()).unwrap_or(u32::MAX)
}

/// Shared response cache type
pub type SharedResponseCache = Arc<ResponseCache>;

/// Creates a shared response cache
pub fn create_shared_cache(config: ResponseCacheConfig) -> SharedResponseCache {
    Arc::new(ResponseCache::new(config))
}
