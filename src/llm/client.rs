// HTTP client for the Anthropic messages API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::retry::with_retry;
use super::types::{MessageRequest, MessageResponse};
use super::LanguageModel;

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_message_once(&self, request: &MessageRequest) -> Result<MessageResponse> {
        tracing::debug!(model = %request.model, "Sending model request");

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .context("Failed to send request to model API")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model API request failed\n\nStatus: {}\nBody: {}", status, error_body);
        }

        let message_response: MessageResponse = response
            .json()
            .await
            .context("Failed to parse model API response")?;

        tracing::debug!(stop_reason = ?message_response.stop_reason, "Received model response");

        Ok(message_response)
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn send_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        with_retry(|| self.send_message_once(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: String) -> AnthropicClient {
        AnthropicClient::new("test-key".to_string(), "test-model".to_string())
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn test_client_creation() {
        let client = AnthropicClient::new("test-key".to_string(), "test-model".to_string());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().model(), "test-model");
    }

    #[tokio::test]
    async fn test_send_message_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_body(
                r#"{
                    "id": "msg_01",
                    "type": "message",
                    "role": "assistant",
                    "content": [{"type": "text", "text": "hello"}],
                    "model": "test-model",
                    "stop_reason": "end_turn"
                }"#,
            )
            .create_async()
            .await;

        let client = test_client(server.url());
        let request = MessageRequest::new("test-model", 1024, "hi");
        let response = client.send_message(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text(), "hello");
    }

    #[tokio::test]
    async fn test_send_message_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(400)
            .with_body(r#"{"error": {"message": "bad request"}}"#)
            .expect_at_least(1)
            .create_async()
            .await;

        let client = test_client(server.url());
        let request = MessageRequest::new("test-model", 1024, "hi");
        let err = client.send_message(&request).await.unwrap_err();
        assert!(err.to_string().contains("400"), "got: {:#}", err);
    }
}
