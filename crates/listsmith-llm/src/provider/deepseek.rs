//! DeepSeek client
//!
//! DeepSeek speaks the `OpenAI` chat completions protocol, so this is a
//! thin wrapper with its own name and default endpoint.

use async_trait::async_trait;
use listsmith_catalog::ApiConfig;
use listsmith_config::ProviderConfig;
use reqwest::Client;

use super::ProviderClient;
use super::openai::OpenAiClient;
use crate::LlmError;

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

pub struct DeepSeekClient {
    inner: OpenAiClient,
}

impl DeepSeekClient {
    pub fn new(client: Client, config: Option<&ProviderConfig>) -> anyhow::Result<Self> {
        Ok(Self {
            inner: OpenAiClient::compatible("deepseek", DEFAULT_BASE_URL, client, config)?,
        })
    }
}

#[async_trait]
impl ProviderClient for DeepSeekClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn has_credential(&self) -> bool {
        self.inner.has_credential()
    }

    async fn complete(&self, prompt: &str, api: &ApiConfig) -> Result<String, LlmError> {
        self.inner.complete(prompt, api).await
    }
}
