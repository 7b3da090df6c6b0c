use listsmith_config::ModelEntryConfig;
use listsmith_core::SubscriptionTier;
use serde::Serialize;

/// Backend call parameters for a catalog model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Model name sent to the vendor
    pub model_name: String,
    /// Output token budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
}

/// An immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Globally unique id, e.g. `openai-gpt-4`
    pub id: String,
    /// Display name
    pub name: String,
    /// Vendor display name (`OpenAI`, `Anthropic`, `DeepSeek`)
    pub provider: String,
    pub description: String,
    /// Marketing tier of the model itself
    pub tier: SubscriptionTier,
    /// Minimum caller tier allowed to use the model
    pub required_subscription: SubscriptionTier,
    pub api_config: ApiConfig,
}

impl ModelDescriptor {
    /// Whether a caller on `tier` may use this model
    pub fn available_to(&self, tier: SubscriptionTier) -> bool {
        tier.permits(self.required_subscription)
    }
}

impl From<&ModelEntryConfig> for ModelDescriptor {
    fn from(entry: &ModelEntryConfig) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            provider: entry.provider.clone(),
            description: entry.description.clone(),
            tier: entry.tier,
            required_subscription: entry.required_subscription.unwrap_or(entry.tier),
            api_config: ApiConfig {
                model_name: entry.model_name.clone(),
                max_tokens: entry.max_tokens,
                temperature: entry.temperature,
            },
        }
    }
}
