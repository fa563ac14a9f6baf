//! Order List Cache
//!
//! Holds at most one snapshot of the full order list under [`ORDER_LIST_KEY`].
//! Backend faults are never surfaced: a failed or undecodable lookup is a
//! miss, a failed store or invalidation is a logged no-op. Every swallowed
//! fault is counted in [`CacheStats::backend_errors`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheStats};
use crate::models::{decode_snapshot, encode_snapshot, Order};

/// The single key the order list snapshot lives under.
pub const ORDER_LIST_KEY: &str = "orders:all";

/// Default snapshot lifetime in seconds.
pub const DEFAULT_ORDER_LIST_TTL: u64 = 30;

// == Order Cache ==
#[derive(Clone)]
pub struct OrderCache {
    backend: Arc<dyn CacheBackend>,
    ttl: u64,
    stats: Arc<Mutex<CacheStats>>,
}

impl OrderCache {
    /// Creates an order cache over `backend` whose snapshots live `ttl` seconds.
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: u64) -> Self {
        Self {
            backend,
            ttl,
            stats: Arc::new(Mutex::new(CacheStats::new())),
        }
    }

    /// Snapshot lifetime in seconds.
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    // == Lookup ==
    /// Returns the cached order list if a live snapshot exists.
    pub async fn lookup(&self) -> Option<Vec<Order>> {
        let bytes = match self.backend.get(ORDER_LIST_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("order list cache miss");
                self.stats.lock().await.record_miss();
                return None;
            }
            Err(e) => {
                warn!(error = %e, "order list lookup failed, reading from store");
                let mut stats = self.stats.lock().await;
                stats.record_backend_error();
                stats.record_miss();
                return None;
            }
        };

        match decode_snapshot(&bytes) {
            Ok(orders) => {
                debug!(count = orders.len(), "order list cache hit");
                self.stats.lock().await.record_hit();
                Some(orders)
            }
            Err(e) => {
                warn!(error = %e, "discarding undecodable order list snapshot");
                let mut stats = self.stats.lock().await;
                stats.record_backend_error();
                stats.record_miss();
                None
            }
        }
    }

    // == Store ==
    /// Replaces the snapshot with `orders`, expiring `ttl` seconds from now.
    pub async fn store(&self, orders: &[Order], ttl: u64) {
        let bytes = match encode_snapshot(orders) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "could not encode order list snapshot");
                self.stats.lock().await.record_backend_error();
                return;
            }
        };

        match self.backend.set_with_expiry(ORDER_LIST_KEY, bytes, ttl).await {
            Ok(()) => {
                debug!(count = orders.len(), ttl, "order list snapshot stored");
                self.stats.lock().await.record_store();
            }
            Err(e) => {
                warn!(error = %e, "could not store order list snapshot");
                self.stats.lock().await.record_backend_error();
            }
        }
    }

    // == Invalidate ==
    /// Drops the snapshot regardless of its remaining lifetime. Safe to call
    /// when nothing is cached.
    pub async fn invalidate(&self) {
        match self.backend.delete(ORDER_LIST_KEY).await {
            Ok(()) => {
                debug!("order list snapshot invalidated");
                self.stats.lock().await.record_invalidation();
            }
            Err(e) => {
                // Self-heals once the stale snapshot's TTL runs out
                warn!(error = %e, "order list invalidation failed, snapshot may be stale");
                self.stats.lock().await.record_backend_error();
            }
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.stats.lock().await.clone()
    }
}
