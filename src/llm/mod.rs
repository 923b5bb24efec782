// Model access layer
//
// `LanguageModel` is the seam between the pipeline and whatever serves
// the completions - the HTTP client in production, scripted fakes in
// tests. Structured generation layers schema-checked parsing on top.

pub mod client;
pub mod retry;
pub mod structured;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use client::AnthropicClient;
pub use structured::{generate_structured, parse_structured};
pub use types::{ContentBlock, Message, MessageContent, MessageRequest, MessageResponse};

/// A model that can serve completion requests
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier stamped on every request
    fn model(&self) -> &str;

    /// Send a request and wait for the complete response
    async fn send_message(&self, request: &MessageRequest) -> Result<MessageResponse>;
}
