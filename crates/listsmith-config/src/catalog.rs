use listsmith_core::SubscriptionTier;
use serde::Deserialize;

/// Optional replacement for the built-in model catalog
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Models in catalog order; empty means use the built-in table
    #[serde(default)]
    pub models: Vec<ModelEntryConfig>,
}

/// One configured catalog entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntryConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Vendor name, matched case-insensitively (`openai`, `anthropic`, `deepseek`)
    pub provider: String,
    pub tier: SubscriptionTier,
    /// Defaults to `tier`
    #[serde(default)]
    pub required_subscription: Option<SubscriptionTier>,
    /// Model name sent to the vendor API
    pub model_name: String,
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

const fn default_temperature() -> f64 {
    0.7
}
