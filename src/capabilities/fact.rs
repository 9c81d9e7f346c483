//! Number trivia capability.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::config::FactsConfig;
use crate::mvi::BoxFuture;

/// Failure fetching a fact. Delivered to reducers as a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactError {
    /// The request could not be sent or the body could not be read.
    #[error("fact request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("fact service returned status {0}")]
    Status(u16),

    /// The HTTP client could not be built.
    #[error("fact client unavailable: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FactError {
    fn from(e: reqwest::Error) -> Self {
        FactError::Request(e.to_string())
    }
}

/// Fetches a trivia sentence about a number.
pub trait FactClient: Send + Sync + 'static {
    fn fetch(&self, number: i64) -> BoxFuture<Result<String, FactError>>;
}

/// Live client: `GET {base_url}/{n}/trivia`, after an optional artificial delay.
pub struct HttpFactClient {
    client: Client,
    base_url: String,
    delay: Duration,
}

impl HttpFactClient {
    pub fn new(config: &FactsConfig) -> Result<Self, FactError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| FactError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    pub fn url_for(&self, number: i64) -> String {
        format!("{}/{}/trivia", self.base_url, number)
    }
}

impl FactClient for HttpFactClient {
    fn fetch(&self, number: i64) -> BoxFuture<Result<String, FactError>> {
        let client = self.client.clone();
        let url = self.url_for(number);
        let delay = self.delay;
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            tracing::debug!(url = %url, "fetching number fact");
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                tracing::warn!(status = %status, url = %url, "fact service error");
                return Err(FactError::Status(status.as_u16()));
            }
            Ok(response.text().await?)
        })
    }
}

/// Client that answers without touching the network.
#[derive(Debug, Clone, Default)]
pub struct OfflineFactClient;

impl FactClient for OfflineFactClient {
    fn fetch(&self, number: i64) -> BoxFuture<Result<String, FactError>> {
        Box::pin(async move { Ok(format!("{number} is a number (offline mode).")) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_strips_trailing_slash() {
        let config = FactsConfig {
            base_url: "http://numbers.test/".into(),
            delay_ms: 0,
            request_timeout_seconds: 1,
        };
        let client = HttpFactClient::new(&config).unwrap();
        assert_eq!(client.url_for(42), "http://numbers.test/42/trivia");
    }

    #[tokio::test]
    async fn offline_client_mentions_number() {
        let fact = OfflineFactClient.fetch(7).await.unwrap();
        assert!(fact.starts_with("7 "));
    }
}
