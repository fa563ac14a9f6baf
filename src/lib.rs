//! Order Service - order dashboard with a cached order list
//!
//! Orders live in SQLite. The full order list is cached under a single key
//! for a bounded time and invalidated after every successful order creation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod orders;
pub mod session;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use orders::OrderService;
pub use tasks::spawn_cleanup_task;
