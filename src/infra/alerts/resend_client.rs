use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::core::alerts::{AlertError, AlertSender, EmailAlert};
use crate::core::config::AlertConfig;

const RESEND_URL: &str = "https://api.resend.com/emails";

/// Sends alert e-mails through the Resend HTTP API.
pub struct ResendClient {
    client: Client,
    api_key: String,
    sender: String,
    destination: String,
}

impl ResendClient {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            sender: config.sender.clone(),
            destination: config.destination.clone(),
        }
    }

    fn payload(&self, alert: &EmailAlert) -> serde_json::Value {
        json!({
            "from": self.sender,
            "to": [self.destination],
            "subject": alert.subject,
            "html": alert.html,
        })
    }
}

#[async_trait]
impl AlertSender for ResendClient {
    async fn send(&self, alert: &EmailAlert) -> Result<(), AlertError> {
        let response = self
            .client
            .post(RESEND_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.payload(alert))
            .send()
            .await
            .map_err(|e| AlertError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::Rejected { status, body });
        }

        Ok(())
    }
}
