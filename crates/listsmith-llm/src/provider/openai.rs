//! `OpenAI` chat completions client

use async_trait::async_trait;
use listsmith_catalog::ApiConfig;
use listsmith_config::ProviderConfig;
use reqwest::Client;
use secrecy::ExposeSecret;

use super::{Endpoint, ProviderClient, post_json, request_timeout};
use crate::LlmError;
use crate::prompt::SYSTEM_PROMPT;
use crate::protocol::openai::{ChatMessage, ChatRequest, ChatResponse};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for `OpenAI` and wire-compatible chat completion APIs
pub struct OpenAiClient {
    name: &'static str,
    client: Client,
    endpoint: Endpoint,
    system_prompt: bool,
}

impl OpenAiClient {
    /// Create from provider configuration
    pub fn new(client: Client, config: Option<&ProviderConfig>) -> anyhow::Result<Self> {
        Ok(Self {
            name: "openai",
            client,
            endpoint: Endpoint::from_config(config, DEFAULT_BASE_URL)?,
            system_prompt: true,
        })
    }

    /// A compatible backend under another name and default URL
    ///
    /// Compatible backends receive only the user message.
    pub(crate) fn compatible(
        name: &'static str,
        default_base_url: &str,
        client: Client,
        config: Option<&ProviderConfig>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            name,
            client,
            endpoint: Endpoint::from_config(config, default_base_url)?,
            system_prompt: false,
        })
    }

    fn wire_request(&self, prompt: &str, api: &ApiConfig) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);

        if self.system_prompt {
            messages.push(ChatMessage::system(SYSTEM_PROMPT));
        }
        messages.push(ChatMessage::user(prompt));

        ChatRequest {
            model: api.model_name.clone(),
            messages,
            max_tokens: api.max_tokens,
            temperature: api.temperature,
        }
    }
}

#[async_trait]
impl ProviderClient for OpenAiClient {
    fn name(&self) -> &str {
        self.name
    }

    fn has_credential(&self) -> bool {
        self.endpoint.api_key.is_some()
    }

    async fn complete(&self, prompt: &str, api: &ApiConfig) -> Result<String, LlmError> {
        let api_key = self.endpoint.api_key.as_ref().ok_or(LlmError::MissingCredential)?;

        let builder = self
            .client
            .post(self.endpoint.url("chat/completions"))
            .bearer_auth(api_key.expose_secret())
            .timeout(request_timeout(api, self.endpoint.timeout));

        let response: ChatResponse = post_json(self.name, builder, &self.wire_request(prompt, api)).await?;

        response.into_text().ok_or(LlmError::EmptyReply)
    }
}
