//! Domain types and HTTP DTOs for the order service

pub mod order;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use order::{decode_snapshot, encode_snapshot, NewOrder, Order, OrderDraft, OrderStatus};
pub use requests::{CreateOrderForm, LoginForm};
pub use responses::{
    DashboardResponse, HealthResponse, LoginPageResponse, SentResponse, StatsResponse,
};
