//! Ordered, read-only table of model descriptors

use std::sync::LazyLock;

use listsmith_config::CatalogConfig;
use listsmith_core::SubscriptionTier;

use crate::{CatalogError, ModelDescriptor, builtin};

static SAFETY_NET: LazyLock<ModelDescriptor> = LazyLock::new(builtin::safety_net);

/// Registry of every model callers may ask for
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// The built-in five-model table
    pub fn builtin() -> Self {
        Self {
            models: builtin::models(),
        }
    }

    /// Build from configuration, falling back to the built-in table when
    /// no models are configured
    pub fn from_config(config: &CatalogConfig) -> Self {
        if config.models.is_empty() {
            return Self::builtin();
        }

        tracing::debug!(models = config.models.len(), "using configured model catalog");

        Self {
            models: config.models.iter().map(ModelDescriptor::from).collect(),
        }
    }

    /// Build from an explicit list, kept in the given order
    pub fn from_models(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// Every descriptor in catalog order
    pub fn list_all(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Tolerant lookup
    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|model| model.id == id)
    }

    /// Strict lookup
    pub fn require(&self, id: &str) -> Result<&ModelDescriptor, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::NotFound(id.to_owned()))
    }

    /// Whether `model` may be used by a caller on `tier`
    pub fn is_available(model: &ModelDescriptor, tier: SubscriptionTier) -> bool {
        model.available_to(tier)
    }

    /// Best model a tier may use
    ///
    /// Among permitted models, picks the highest `tier` with the first in
    /// catalog order winning ties. Falls back to the first entry when the
    /// tier permits nothing, and to a built-in model when the catalog is
    /// empty.
    pub fn default_for(&self, tier: SubscriptionTier) -> &ModelDescriptor {
        let mut best: Option<&ModelDescriptor> = None;

        for model in self.models.iter().filter(|model| model.available_to(tier)) {
            if best.is_none_or(|current| model.tier > current.tier) {
                best = Some(model);
            }
        }

        best.or_else(|| self.models.first()).unwrap_or(&SAFETY_NET)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
