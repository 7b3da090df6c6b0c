use listsmith_catalog::{ModelCatalog, ModelDescriptor};
use listsmith_core::SubscriptionTier;
use serde::Serialize;

/// Compact model reference returned with results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub id: String,
    pub name: String,
    pub provider: String,
}

impl From<&ModelDescriptor> for ModelSummary {
    fn from(model: &ModelDescriptor) -> Self {
        Self {
            id: model.id.clone(),
            name: model.name.clone(),
            provider: model.provider.clone(),
        }
    }
}

/// Upgrade prompt attached when a requested model was replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionWarning {
    /// Display name of the requested model, or the raw id if unknown
    pub requested_model: String,
    /// Display name of the model actually used
    pub actual_model: String,
    pub reason: String,
    /// Lowest tier that permits the requested model
    pub required_subscription: SubscriptionTier,
}

impl SubscriptionWarning {
    /// Tier suggested when the requested id is not in the catalog
    pub const UNKNOWN_MODEL_TIER: SubscriptionTier = SubscriptionTier::Pro;

    pub fn new(catalog: &ModelCatalog, requested_id: &str, actual: &ModelDescriptor, tier: SubscriptionTier) -> Self {
        let requested = catalog.get(requested_id);

        Self {
            requested_model: requested.map_or_else(|| requested_id.to_owned(), |model| model.name.clone()),
            actual_model: actual.name.clone(),
            reason: format!(
                "Your current subscription ({tier}) does not include access to the requested AI model. \
                 Upgrade your subscription to use premium models."
            ),
            required_subscription: requested.map_or(Self::UNKNOWN_MODEL_TIER, |model| model.required_subscription),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_models() {
        let catalog = ModelCatalog::builtin();
        let actual = catalog.default_for(SubscriptionTier::Free);

        let warning = SubscriptionWarning::new(&catalog, "claude-3-7-sonnet", actual, SubscriptionTier::Free);

        assert_eq!(warning.requested_model, "Claude 3.7 Sonnet");
        assert_eq!(warning.actual_model, "GPT-3.5 Turbo");
        assert_eq!(warning.required_subscription, SubscriptionTier::Enterprise);
        assert!(warning.reason.starts_with("Your current subscription (free)"));
    }

    #[test]
    fn unknown_models_suggest_pro() {
        let catalog = ModelCatalog::builtin();
        let actual = catalog.default_for(SubscriptionTier::Basic);

        let warning = SubscriptionWarning::new(&catalog, "gpt-9", actual, SubscriptionTier::Basic);

        assert_eq!(warning.requested_model, "gpt-9");
        assert_eq!(warning.required_subscription, SubscriptionTier::Pro);
    }

    #[test]
    fn serializes_camel_case() {
        let catalog = ModelCatalog::builtin();
        let warning = SubscriptionWarning::new(
            &catalog,
            "openai-gpt-4",
            catalog.default_for(SubscriptionTier::Free),
            SubscriptionTier::Free,
        );

        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["requiredSubscription"], "basic");
        assert_eq!(json["requestedModel"], "GPT-4");
    }
}
