//! Provider name to client routing

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use listsmith_config::{ProviderConfig, ProvidersConfig};
use reqwest::Client;

use crate::ProviderClient;
use crate::provider::anthropic::AnthropicClient;
use crate::provider::deepseek::DeepSeekClient;
use crate::provider::openai::OpenAiClient;

/// Vendors with a built-in client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    DeepSeek,
}

impl ProviderKind {
    pub const ALL: [Self; 3] = [Self::OpenAi, Self::Anthropic, Self::DeepSeek];

    /// Kind used for unrecognized provider names
    pub const BASELINE: Self = Self::OpenAi;

    /// Lowercase registration key
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }

    fn config(self, providers: &ProvidersConfig) -> Option<&ProviderConfig> {
        match self {
            Self::OpenAi => providers.openai.as_ref(),
            Self::Anthropic => providers.anthropic.as_ref(),
            Self::DeepSeek => providers.deepseek.as_ref(),
        }
    }

    fn build(self, client: Client, config: Option<&ProviderConfig>) -> anyhow::Result<Arc<dyn ProviderClient>> {
        Ok(match self {
            Self::OpenAi => Arc::new(OpenAiClient::new(client, config)?),
            Self::Anthropic => Arc::new(AnthropicClient::new(client, config)?),
            Self::DeepSeek => Arc::new(DeepSeekClient::new(client, config)?),
        })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration table from provider name to shared client
///
/// Lookups never fail: unknown names get the baseline client.
#[derive(Clone)]
pub struct ProviderFactory {
    clients: HashMap<String, Arc<dyn ProviderClient>>,
    baseline: Arc<dyn ProviderClient>,
}

impl ProviderFactory {
    /// Start a table whose fallback is `baseline`
    ///
    /// The baseline is also registered under its own kind's name.
    pub fn new(baseline: Arc<dyn ProviderClient>) -> Self {
        let mut clients = HashMap::new();
        clients.insert(ProviderKind::BASELINE.as_str().to_owned(), Arc::clone(&baseline));

        Self { clients, baseline }
    }

    /// Register or replace the client for `name`
    #[must_use]
    pub fn register(mut self, name: &str, client: Arc<dyn ProviderClient>) -> Self {
        self.clients.insert(name.trim().to_ascii_lowercase(), client);
        self
    }

    /// Build one client per known vendor from configuration
    pub fn from_config(providers: &ProvidersConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("listsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        let baseline = ProviderKind::BASELINE.build(http.clone(), ProviderKind::BASELINE.config(providers))?;
        let mut factory = Self::new(baseline);

        for kind in ProviderKind::ALL {
            if kind == ProviderKind::BASELINE {
                continue;
            }

            let client = kind.build(http.clone(), kind.config(providers))?;
            factory = factory.register(kind.as_str(), client);
        }

        for (name, client) in &factory.clients {
            tracing::info!(provider = %name, live = client.has_credential(), "registered provider client");
        }

        Ok(factory)
    }

    /// Client for a catalog provider name, matched case-insensitively
    pub fn create_client(&self, provider: &str) -> Arc<dyn ProviderClient> {
        let key = provider.trim().to_ascii_lowercase();

        match self.clients.get(&key) {
            Some(client) => Arc::clone(client),
            None => {
                tracing::debug!(provider, "unknown provider, using baseline client");
                Arc::clone(&self.baseline)
            }
        }
    }

    /// Registered provider names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }
}

impl fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();

        f.debug_struct("ProviderFactory")
            .field("clients", &names)
            .field("baseline", &self.baseline.name())
            .finish()
    }
}
