use listsmith_core::SubscriptionTier;

use crate::{ApiConfig, ModelDescriptor};

struct Entry {
    id: &'static str,
    name: &'static str,
    provider: &'static str,
    description: &'static str,
    tier: SubscriptionTier,
    model_name: &'static str,
    max_tokens: u32,
    temperature: f64,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "openai-gpt-3.5-turbo",
        name: "GPT-3.5 Turbo",
        provider: "OpenAI",
        description: "Balanced model for general optimization tasks",
        tier: SubscriptionTier::Free,
        model_name: "gpt-3.5-turbo",
        max_tokens: 2000,
        temperature: 0.7,
    },
    Entry {
        id: "deepseek-coder",
        name: "DeepSeek Coder",
        provider: "DeepSeek",
        description: "Specialized in structured content optimization",
        tier: SubscriptionTier::Free,
        model_name: "deepseek-coder-1.3b",
        max_tokens: 2000,
        temperature: 0.5,
    },
    Entry {
        id: "openai-gpt-4",
        name: "GPT-4",
        provider: "OpenAI",
        description: "Advanced optimization with better understanding of market context",
        tier: SubscriptionTier::Basic,
        model_name: "gpt-4",
        max_tokens: 4000,
        temperature: 0.7,
    },
    Entry {
        id: "claude-3-5-sonnet",
        name: "Claude 3.5 Sonnet",
        provider: "Anthropic",
        description: "Excellent for creative, nuanced listing optimization",
        tier: SubscriptionTier::Pro,
        model_name: "claude-3-5-sonnet-20240620",
        max_tokens: 4000,
        temperature: 0.7,
    },
    Entry {
        id: "claude-3-7-sonnet",
        name: "Claude 3.7 Sonnet",
        provider: "Anthropic",
        description: "Premium optimization with advanced market understanding and SEO",
        tier: SubscriptionTier::Enterprise,
        model_name: "claude-3-7-sonnet-20240229",
        max_tokens: 4000,
        temperature: 0.7,
    },
];

/// The default model table, in catalog order
pub(crate) fn models() -> Vec<ModelDescriptor> {
    ENTRIES.iter().map(descriptor).collect()
}

/// Last-resort model for an empty catalog
pub(crate) fn safety_net() -> ModelDescriptor {
    descriptor(&ENTRIES[0])
}

fn descriptor(entry: &Entry) -> ModelDescriptor {
    ModelDescriptor {
        id: entry.id.to_owned(),
        name: entry.name.to_owned(),
        provider: entry.provider.to_owned(),
        description: entry.description.to_owned(),
        tier: entry.tier,
        required_subscription: entry.tier,
        api_config: ApiConfig {
            model_name: entry.model_name.to_owned(),
            max_tokens: entry.max_tokens,
            temperature: entry.temperature,
        },
    }
}
