//! Order Store Module
//!
//! The relational source of truth for orders.

mod sqlite;

pub use sqlite::SqliteOrderStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewOrder, Order};

// == Order Store ==
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Persists `order` and returns it with its store-assigned id. The row is
    /// committed and visible to later queries once this returns `Ok`.
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Returns every order, oldest first.
    async fn query_all(&self) -> Result<Vec<Order>, StoreError>;
}
