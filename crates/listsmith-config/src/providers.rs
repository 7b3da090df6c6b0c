use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Credentials and endpoints for each supported LLM vendor
///
/// A vendor without a usable `api_key` is still routable; its client
/// just answers with synthesized listings instead of calling out.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: Option<ProviderConfig>,
    #[serde(default)]
    pub anthropic: Option<ProviderConfig>,
    #[serde(default)]
    pub deepseek: Option<ProviderConfig>,
}

/// Configuration for a single LLM vendor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key; empty strings count as unset
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (e.g. a proxy or a local mock)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Fixed request timeout such as `"30s"`, overriding the token-based default
    #[serde(default)]
    pub timeout: Option<String>,
}

impl ProviderConfig {
    /// The API key, if one is actually set
    pub fn credential(&self) -> Option<&SecretString> {
        self.api_key.as_ref().filter(|key| !key.expose_secret().trim().is_empty())
    }

    /// Parsed timeout override
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout` is not a valid duration string
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|raw| duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid provider timeout '{raw}': {e}")))
            .transpose()
    }
}
