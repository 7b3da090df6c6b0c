//! Anthropic Messages API client

use async_trait::async_trait;
use listsmith_catalog::ApiConfig;
use listsmith_config::ProviderConfig;
use reqwest::Client;
use secrecy::ExposeSecret;

use super::{Endpoint, ProviderClient, post_json, request_timeout};
use crate::LlmError;
use crate::protocol::anthropic::{MessagesRequest, MessagesResponse};
use crate::protocol::openai::ChatMessage;

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client
pub struct AnthropicClient {
    client: Client,
    endpoint: Endpoint,
}

impl AnthropicClient {
    /// Create from provider configuration
    pub fn new(client: Client, config: Option<&ProviderConfig>) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            endpoint: Endpoint::from_config(config, DEFAULT_BASE_URL)?,
        })
    }
}

#[async_trait]
impl ProviderClient for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn has_credential(&self) -> bool {
        self.endpoint.api_key.is_some()
    }

    async fn complete(&self, prompt: &str, api: &ApiConfig) -> Result<String, LlmError> {
        let api_key = self.endpoint.api_key.as_ref().ok_or(LlmError::MissingCredential)?;

        let request = MessagesRequest {
            model: api.model_name.clone(),
            max_tokens: api.max_tokens,
            messages: vec![ChatMessage::user(prompt)],
            temperature: api.temperature,
        };

        let builder = self
            .client
            .post(self.endpoint.url("messages"))
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .timeout(request_timeout(api, self.endpoint.timeout));

        let response: MessagesResponse = post_json(self.name(), builder, &request).await?;

        response.into_text().ok_or(LlmError::EmptyReply)
    }
}
