//! Provider clients for LLM backends

pub mod anthropic;
pub mod deepseek;
pub mod openai;

use std::time::Duration;

use async_trait::async_trait;
use listsmith_catalog::ApiConfig;
use listsmith_config::ProviderConfig;
use listsmith_core::ListingContent;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{LlmError, OptimizationContext, extract, fallback, prompt};

/// Fixed part of every request timeout
const BASE_TIMEOUT: Duration = Duration::from_secs(10);

/// Extra time granted per requested output token
const PER_TOKEN_TIMEOUT: Duration = Duration::from_millis(25);

/// Upper bound for derived timeouts
const MAX_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait implemented by each LLM vendor client
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Whether a live API key is configured
    fn has_credential(&self) -> bool;

    /// Send one prompt and return the raw reply text
    async fn complete(&self, prompt: &str, api: &ApiConfig) -> Result<String, LlmError>;

    /// Produce listing content for `context`
    ///
    /// Makes at most one network call. Any failure, or a missing
    /// credential, yields the deterministic synthesized listing instead.
    async fn generate(&self, context: &OptimizationContext) -> ListingContent {
        if !self.has_credential() {
            tracing::debug!(
                provider = self.name(),
                platform = %context.platform,
                "no credential configured, synthesizing listing"
            );
            return fallback::synthesize(context);
        }

        let prompt = prompt::build_prompt(context);

        let result = match self.complete(&prompt, &context.api).await {
            Ok(reply) => extract::parse_listing(&reply, context.platform),
            Err(e) => Err(e),
        };

        match result {
            Ok(content) => {
                tracing::debug!(
                    provider = self.name(),
                    platform = %context.platform,
                    model = %context.api.model_name,
                    "provider produced listing"
                );
                content
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    platform = %context.platform,
                    model = %context.api.model_name,
                    error = %e,
                    "provider call failed, synthesizing listing"
                );
                fallback::synthesize(context)
            }
        }
    }
}

/// Request timeout sized to the model's output budget
///
/// An explicit override from configuration wins.
pub fn request_timeout(api: &ApiConfig, configured: Option<Duration>) -> Duration {
    configured.unwrap_or_else(|| (BASE_TIMEOUT + PER_TOKEN_TIMEOUT * api.max_tokens).min(MAX_TIMEOUT))
}

/// Connection settings shared by every client
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    pub base_url: String,
    pub api_key: Option<secrecy::SecretString>,
    pub timeout: Option<Duration>,
}

impl Endpoint {
    pub fn from_config(config: Option<&ProviderConfig>, default_base_url: &str) -> anyhow::Result<Self> {
        let base_url = config
            .and_then(|c| c.base_url.as_ref())
            .map_or(default_base_url, url::Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        let timeout = config.map(ProviderConfig::timeout).transpose()?.flatten();

        Ok(Self {
            base_url,
            api_key: config.and_then(ProviderConfig::credential).cloned(),
            timeout,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

/// POST a JSON body and decode a JSON response
pub(crate) async fn post_json<Req, Res>(
    provider: &str,
    builder: reqwest::RequestBuilder,
    body: &Req,
) -> Result<Res, LlmError>
where
    Req: Serialize + Sync,
    Res: DeserializeOwned,
{
    let response = builder.json(body).send().await.map_err(|e| {
        tracing::error!(provider, error = %e, "upstream request failed");
        LlmError::Upstream(e.to_string())
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(provider, status = %status, "upstream returned error");
        return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
    }

    response
        .json()
        .await
        .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))
}
