//! Response DTOs for the order service API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::Order;

/// Response body for the dashboard (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    /// Email of the logged-in user
    pub user_email: String,
    /// Every order in the store, not only the user's own
    pub orders: Vec<Order>,
}

impl DashboardResponse {
    pub fn new(user_email: impl Into<String>, orders: Vec<Order>) -> Self {
        Self {
            user_email: user_email.into(),
            orders,
        }
    }
}

/// Response body for GET /login
///
/// Describes the form `POST /login` expects.
#[derive(Debug, Clone, Serialize)]
pub struct LoginPageResponse {
    pub action: String,
    pub method: String,
    pub fields: Vec<String>,
}

impl LoginPageResponse {
    pub fn new() -> Self {
        Self {
            action: "/login".to_string(),
            method: "POST".to_string(),
            fields: vec!["email".to_string()],
        }
    }
}

impl Default for LoginPageResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for GET /sent
#[derive(Debug, Clone, Serialize)]
pub struct SentResponse {
    /// "sent" when the notification service accepted the request, "failed" otherwise
    pub status: String,
    pub recipient: String,
}

impl SentResponse {
    pub fn new(delivered: bool, recipient: impl Into<String>) -> Self {
        Self {
            status: if delivered { "sent" } else { "failed" }.to_string(),
            recipient: recipient.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub invalidations: u64,
    /// Backend faults that were swallowed and treated as misses or no-ops
    pub backend_errors: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            invalidations: stats.invalidations,
            backend_errors: stats.backend_errors,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
