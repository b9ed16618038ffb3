//! Caching module for the Edudir serve crate
//!
//! Holds serialized responses of the read endpoints keyed by route and
//! parameters.

pub mod response_cache;

pub use response_cache::{
    create_shared_cache, CachedResponse, ResponseCache, ResponseCacheConfig, ResponseCacheKey,
    SharedResponseCache,
};
