//! Tier-aware model selection

use std::sync::Arc;

use listsmith_core::SubscriptionTier;

use crate::{ModelCatalog, ModelDescriptor};

/// Why a requested model was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DowngradeReason {
    /// The model exists but needs a higher tier
    InsufficientTier { required: SubscriptionTier },
    /// No catalog entry carries the requested id
    UnknownModel,
}

/// Outcome of resolving a model request
#[derive(Debug, Clone)]
pub struct Selection {
    /// The model that will serve the request
    pub model: ModelDescriptor,
    /// True exactly when a model was requested and a different one was chosen
    pub downgraded: bool,
    pub reason: Option<DowngradeReason>,
}

/// Resolves `(requested id, caller tier)` into one usable model
#[derive(Debug, Clone)]
pub struct ModelSelector {
    catalog: Arc<ModelCatalog>,
}

impl ModelSelector {
    pub const fn new(catalog: Arc<ModelCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Pick the model for a request
    ///
    /// Blank ids count as no request. Never fails.
    pub fn select(&self, requested: Option<&str>, tier: SubscriptionTier) -> Selection {
        let default = self.catalog.default_for(tier);

        let Some(requested) = requested.map(str::trim).filter(|id| !id.is_empty()) else {
            return Selection {
                model: default.clone(),
                downgraded: false,
                reason: None,
            };
        };

        let reason = match self.catalog.get(requested) {
            Some(model) if model.available_to(tier) => {
                return Selection {
                    model: model.clone(),
                    downgraded: false,
                    reason: None,
                };
            }
            Some(model) => DowngradeReason::InsufficientTier {
                required: model.required_subscription,
            },
            None => DowngradeReason::UnknownModel,
        };

        tracing::debug!(
            requested,
            selected = %default.id,
            tier = %tier,
            ?reason,
            "requested model not permitted, using tier default"
        );

        Selection {
            downgraded: default.id != requested,
            model: default.clone(),
            reason: Some(reason),
        }
    }
}
