//! API Module
//!
//! HTTP handlers and routing for the order service.
//!
//! # Endpoints
//! - `GET /login` - Describe the login form
//! - `POST /login` - Open a session for an email
//! - `POST /logout` - Close the current session
//! - `GET /` - Dashboard: every order, served through the order list cache
//! - `POST /orders` - Create an order and invalidate the order list cache
//! - `GET /sent` - Ask the notification service for a confirmation email
//! - `GET /stats` - Order list cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
