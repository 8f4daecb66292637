//! HTTP delivery to Discord-compatible webhooks.
//!
//! A webhook post is a single `POST` with a JSON body `{"content": "..."}`.
//! Discord answers `204 No Content`; any 2xx is treated as delivered.

use std::time::Duration;

use almanac_config::DeliveryConfig;
use tracing::{debug, info};

use crate::chunk::split_message;
use crate::error::{DeliveryError, redact};

/// Posts message content to webhook URLs.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    chunk_delay: Duration,
    max_message_length: usize,
}

impl WebhookClient {
    /// Build a client from the delivery settings.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::Http`] if the TLS backend cannot be initialised.
    pub fn new(settings: &DeliveryConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(|source| DeliveryError::Http {
                target: "client setup".to_owned(),
                source,
            })?;
        Ok(Self {
            client,
            chunk_delay: Duration::from_millis(settings.chunk_delay_ms),
            max_message_length: settings.max_message_length,
        })
    }

    /// Post one message.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::Http`] if no response arrives,
    /// [`DeliveryError::Status`] on a non-2xx response.
    pub async fn post(&self, url: &str, content: &str) -> Result<(), DeliveryError> {
        let target = redact(url);
        let body = serde_json::json!({ "content": content });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|source| DeliveryError::Http {
                target: target.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(DeliveryError::Status {
                target,
                status: status.as_u16(),
                body: error_body,
            });
        }

        debug!(webhook = %target, status = status.as_u16(), "webhook accepted message");
        Ok(())
    }

    /// Post `content`, split into as many messages as the length limit
    /// requires, pausing between them. Stops at the first failed chunk.
    ///
    /// Returns the number of messages posted.
    ///
    /// # Errors
    ///
    /// As [`WebhookClient::post`].
    pub async fn send_chunked(&self, url: &str, content: &str) -> Result<usize, DeliveryError> {
        let chunks = split_message(content, self.max_message_length);
        let total = chunks.len();
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 && !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }
            self.post(url, chunk).await?;
        }
        info!(webhook = %redact(url), messages = total, "webhook delivery complete");
        Ok(total)
    }
}
