//! Order Read and Write Paths
//!
//! Reads consult the order list cache before the store; writes commit to the
//! store and then invalidate the cache.
//!
//! # Consistency
//! Read-after-write consistency is not guaranteed. A read that misses, queries
//! the store, and populates the cache after a concurrent write's invalidation
//! leaves a stale snapshot for at most one TTL. Eventual consistency within
//! the TTL is the contract.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::OrderCache;
use crate::error::Result;
use crate::models::{NewOrder, Order, OrderDraft};
use crate::store::OrderStore;

// == Order Service ==
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    cache: OrderCache,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, cache: OrderCache) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &OrderCache {
        &self.cache
    }

    // == List Orders ==
    /// Returns every order, from the cached snapshot when one is live.
    ///
    /// `viewer` identifies the caller for logging only; the list is not
    /// filtered by owner.
    pub async fn list_orders(&self, viewer: &str) -> Result<Vec<Order>> {
        if let Some(orders) = self.cache.lookup().await {
            return Ok(orders);
        }

        let orders = self.store.query_all().await.map_err(|e| {
            warn!(viewer, error = %e, "order list query failed");
            e
        })?;
        self.cache.store(&orders, self.cache.ttl()).await;

        Ok(orders)
    }

    // == Create Order ==
    /// Persists a `Pending` order owned by `owner`, then invalidates the
    /// order list snapshot. Nothing is invalidated if the insert fails.
    pub async fn create_order(&self, owner: &str, draft: OrderDraft) -> Result<Order> {
        let order = self.store.insert(NewOrder::pending(draft, owner)).await.map_err(|e| {
            warn!(owner, error = %e, "order insert failed");
            e
        })?;

        self.cache.invalidate().await;

        info!(
            order_id = order.id,
            owner,
            product = %order.product,
            "Order created"
        );
        Ok(order)
    }
}
