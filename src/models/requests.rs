//! Request DTOs for the order service API
//!
//! Both forms arrive as `application/x-www-form-urlencoded`. Order fields are
//! taken as raw strings so that malformed numbers surface as our own
//! validation errors instead of a generic extractor rejection.

use serde::Deserialize;

use crate::models::OrderDraft;

/// Request body for POST /login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    /// Email the session will be bound to
    #[serde(default)]
    pub email: String,
}

impl LoginForm {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.email.trim().is_empty() {
            return Some("Email cannot be empty".to_string());
        }
        None
    }
}

/// Request body for POST /orders
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderForm {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

impl CreateOrderForm {
    /// Validates the form and converts it into an [`OrderDraft`].
    ///
    /// # Rules
    /// - `product` is required and must not be blank
    /// - `quantity` must be an integer greater than zero
    /// - `price` must be a finite number, zero or more
    pub fn into_draft(self) -> Result<OrderDraft, String> {
        let product = self
            .product
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "Product cannot be empty".to_string())?;

        let quantity_raw = self
            .quantity
            .ok_or_else(|| "Quantity is required".to_string())?;
        let quantity: i64 = quantity_raw
            .trim()
            .parse()
            .map_err(|_| format!("Quantity '{}' is not an integer", quantity_raw))?;
        if quantity <= 0 {
            return Err("Quantity must be greater than zero".to_string());
        }

        let price_raw = self.price.ok_or_else(|| "Price is required".to_string())?;
        let price: f64 = price_raw
            .trim()
            .parse()
            .map_err(|_| format!("Price '{}' is not a number", price_raw))?;
        if !price.is_finite() || price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }

        Ok(OrderDraft {
            product,
            quantity,
            price,
        })
    }
}
