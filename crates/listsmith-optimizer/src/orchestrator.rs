//! Fan-out of one product over several marketplaces

use futures_util::future::join_all;
use listsmith_catalog::{ModelDescriptor, ModelSelector, Selection};
use listsmith_core::{OptimizedListing, Platform, Product, SubscriptionTier};
use listsmith_llm::{OptimizationContext, ProviderFactory};

use crate::{ModelSummary, OptimizeError, SubscriptionWarning};

/// Input for one optimization run
#[derive(Debug, Clone, Default)]
pub struct OptimizationRequest {
    pub product: Product,
    /// Target marketplaces; duplicates are collapsed
    pub platforms: Vec<Platform>,
    pub focus: Option<String>,
    pub audience: Option<String>,
    /// Catalog id the caller asked for, if any
    pub model_id: Option<String>,
}

/// Listings produced by one run, in platform order
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    pub listings: Vec<OptimizedListing>,
    pub model: ModelSummary,
    /// Present exactly when the requested model was replaced
    pub warning: Option<SubscriptionWarning>,
}

/// A single regenerated listing
#[derive(Debug, Clone)]
pub struct Regeneration {
    pub listing: OptimizedListing,
    pub model: ModelSummary,
    pub warning: Option<SubscriptionWarning>,
}

/// Resolves the model once per request and drives the provider clients
#[derive(Debug, Clone)]
pub struct Orchestrator {
    selector: ModelSelector,
    providers: ProviderFactory,
}

impl Orchestrator {
    pub const fn new(selector: ModelSelector, providers: ProviderFactory) -> Self {
        Self { selector, providers }
    }

    pub const fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    /// Produce one listing per distinct platform
    ///
    /// Provider failures are absorbed by the clients, so a valid request
    /// always yields exactly one listing per distinct platform.
    pub async fn optimize(
        &self,
        request: OptimizationRequest,
        tier: SubscriptionTier,
    ) -> Result<OptimizationOutcome, OptimizeError> {
        validate_product(&request.product)?;

        let platforms = distinct(&request.platforms);
        if platforms.is_empty() {
            return Err(OptimizeError::InvalidRequest(
                "at least one platform is required".to_owned(),
            ));
        }

        let selection = self.selector.select(request.model_id.as_deref(), tier);
        let warning = self.warning(&selection, request.model_id.as_deref(), tier);

        tracing::info!(
            product = %request.product.id,
            platforms = platforms.len(),
            model = %selection.model.id,
            tier = %tier,
            downgraded = selection.downgraded,
            "optimizing product"
        );

        let listings = join_all(platforms.iter().map(|&platform| {
            self.generate(
                &request.product,
                platform,
                request.focus.clone(),
                request.audience.clone(),
                &selection.model,
            )
        }))
        .await;

        Ok(OptimizationOutcome {
            listings,
            model: ModelSummary::from(&selection.model),
            warning,
        })
    }

    /// Run the pipeline again for a single platform
    pub async fn regenerate(
        &self,
        product: &Product,
        platform: Platform,
        focus: Option<String>,
        audience: Option<String>,
        model_id: Option<&str>,
        tier: SubscriptionTier,
    ) -> Result<Regeneration, OptimizeError> {
        validate_product(product)?;

        let selection = self.selector.select(model_id, tier);
        let warning = self.warning(&selection, model_id, tier);

        tracing::info!(
            product = %product.id,
            platform = %platform,
            model = %selection.model.id,
            downgraded = selection.downgraded,
            "regenerating listing"
        );

        let listing = self.generate(product, platform, focus, audience, &selection.model).await;

        Ok(Regeneration {
            listing,
            model: ModelSummary::from(&selection.model),
            warning,
        })
    }

    async fn generate(
        &self,
        product: &Product,
        platform: Platform,
        focus: Option<String>,
        audience: Option<String>,
        model: &ModelDescriptor,
    ) -> OptimizedListing {
        let client = self.providers.create_client(&model.provider);
        let context = OptimizationContext::new(product.clone(), platform, focus, audience, model.api_config.clone());

        let content = client.generate(&context).await;
        OptimizedListing::assemble(content, product, platform)
    }

    fn warning(
        &self,
        selection: &Selection,
        requested: Option<&str>,
        tier: SubscriptionTier,
    ) -> Option<SubscriptionWarning> {
        if !selection.downgraded {
            return None;
        }

        let requested = requested.map(str::trim)?;
        Some(SubscriptionWarning::new(self.selector.catalog(), requested, &selection.model, tier))
    }
}

fn validate_product(product: &Product) -> Result<(), OptimizeError> {
    if product.id.trim().is_empty() {
        return Err(OptimizeError::InvalidRequest("product id is required".to_owned()));
    }
    if product.title.trim().is_empty() {
        return Err(OptimizeError::InvalidRequest("product title is required".to_owned()));
    }
    Ok(())
}

/// Drop repeated platforms, keeping first occurrences in order
fn distinct(platforms: &[Platform]) -> Vec<Platform> {
    let mut seen = Vec::with_capacity(platforms.len());
    for &platform in platforms {
        if !seen.contains(&platform) {
            seen.push(platform);
        }
    }
    seen
}
