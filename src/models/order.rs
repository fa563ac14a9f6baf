//! Order entity and the cached order list snapshot format
//!
//! The snapshot is a JSON array of objects keyed `id`, `product`, `quantity`,
//! `price`, `status`, `email_client`. Those key names are the cache wire
//! format; renaming a field breaks snapshots written by other instances.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Order Status ==
/// Lifecycle state of an order. New orders always start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Confirmed" => Ok(OrderStatus::Confirmed),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

// == Order ==
/// A persisted order. Also the projection stored in the order list snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned, monotonic surrogate key
    pub id: i64,
    /// Product name, never empty
    pub product: String,
    /// Number of units, always positive
    pub quantity: i64,
    /// Unit price, never negative
    pub price: f64,
    pub status: OrderStatus,
    /// Email of the user who placed the order
    pub email_client: String,
}

// == New Order ==
/// An order that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub product: String,
    pub quantity: i64,
    pub price: f64,
    pub status: OrderStatus,
    pub email_client: String,
}

impl NewOrder {
    /// Builds a `Pending` order owned by `email_client`.
    pub fn pending(draft: OrderDraft, email_client: impl Into<String>) -> Self {
        Self {
            product: draft.product,
            quantity: draft.quantity,
            price: draft.price,
            status: OrderStatus::Pending,
            email_client: email_client.into(),
        }
    }
}

// == Order Draft ==
/// Validated order form input, not yet tied to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub product: String,
    pub quantity: i64,
    pub price: f64,
}

// == Snapshot Codec ==
/// Serializes an order list into snapshot bytes.
pub fn encode_snapshot(orders: &[Order]) -> Result<Vec<u8>, CacheError> {
    serde_json::to_vec(orders).map_err(|e| CacheError::Corrupt(e.to_string()))
}

/// Parses snapshot bytes back into orders, preserving their order.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<Order>, CacheError> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Corrupt(e.to_string()))
}
