//! Notification Client
//!
//! Hands order confirmations to the external notification service, which
//! logs and mails them.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::NotifyError;

/// Body of `POST /email` on the notification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRequest {
    #[serde(rename = "email_destinataire")]
    pub recipient: String,
    pub message: String,
}

impl EmailRequest {
    /// Confirmation sent after a user places orders.
    pub fn order_confirmation(recipient: impl Into<String>) -> Self {
        let recipient = recipient.into();
        Self {
            message: format!("Your order is confirmed. Thank you {}!", recipient),
            recipient,
        }
    }
}

// == Notifier ==
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn send(&self, email: &EmailRequest) -> Result<(), NotifyError>;
}

// == HTTP Notifier ==
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, email: &EmailRequest) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(email)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        info!(recipient = %email.recipient, status = status.as_u16(), "Notification accepted");
        Ok(())
    }
}
