//! Cache Module
//!
//! Expiring key/value backends and the order list cache built on them.

mod backend;
mod entry;
mod order_cache;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, HttpCacheBackend, MemoryBackend, RemoteGetResponse, RemoteSetRequest};
pub use entry::CacheEntry;
pub use order_cache::{OrderCache, DEFAULT_ORDER_LIST_TTL, ORDER_LIST_KEY};
pub use stats::CacheStats;
pub use store::MemoryCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 8 * 1024 * 1024; // 8 MB
