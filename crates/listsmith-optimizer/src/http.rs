//! Axum handlers for the optimization endpoints

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{FromRequest, Path, Request, State};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use jiff::Timestamp;
use listsmith_core::{Caller, HttpError, OptimizationRecord, OptimizedListing, Platform, Product, SubscriptionTier};
use listsmith_store::Stores;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{ModelSummary, OptimizationRequest, OptimizeError, Orchestrator, SubscriptionWarning};

/// Shared state for optimization handlers
#[derive(Clone)]
pub struct OptimizerState {
    inner: Arc<OptimizerStateInner>,
}

struct OptimizerStateInner {
    orchestrator: Orchestrator,
    stores: Stores,
    /// Per-optimization locks serializing read-modify-write of a record
    record_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl OptimizerState {
    pub fn new(orchestrator: Orchestrator, stores: Stores) -> Self {
        Self {
            inner: Arc::new(OptimizerStateInner {
                orchestrator,
                stores,
                record_locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.inner.stores
    }

    fn orchestrator(&self) -> &Orchestrator {
        &self.inner.orchestrator
    }

    /// Exclusive access to the record stored under `id`
    async fn lock_record(&self, id: &str) -> RecordGuard {
        let lock = {
            let mut locks = self.inner.record_locks.lock().await;
            Arc::clone(locks.entry(id.to_owned()).or_default())
        };

        RecordGuard {
            state: self.clone(),
            id: id.to_owned(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Drop the lock entry for `id` once nobody holds or waits on it
    async fn release_record(&self, id: &str) {
        let mut locks = self.inner.record_locks.lock().await;
        if locks.get(id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(id);
        }
    }

    /// Load a product the caller owns
    async fn owned_product(&self, caller: &Caller, id: &str) -> Result<Product, OptimizeError> {
        self.stores()
            .products
            .get(id)
            .await?
            .filter(|product| caller.owns(&product.user_id))
            .ok_or(OptimizeError::ProductNotFound)
    }

    /// Load an optimization record the caller owns
    async fn owned_record(&self, caller: &Caller, id: &str) -> Result<OptimizationRecord, OptimizeError> {
        self.stores()
            .optimizations
            .get(id)
            .await?
            .filter(|record| caller.owns(&record.user_id))
            .ok_or(OptimizeError::OptimizationNotFound)
    }

    /// Best-effort removal of a listing no record references
    async fn discard_listing(&self, id: &str) {
        if let Err(e) = self.stores().listings.delete(id).await {
            tracing::warn!(listing = %id, error = %e, "failed to delete unreferenced listing");
        }
    }

    /// Fetch the listings a record references, skipping dangling ids
    async fn listings(&self, record: &OptimizationRecord) -> Result<Vec<OptimizedListing>, OptimizeError> {
        let mut listings = Vec::with_capacity(record.optimized_listings.len());

        for id in &record.optimized_listings {
            match self.stores().listings.get(id).await? {
                Some(listing) => listings.push(listing),
                None => tracing::warn!(optimization = %record.id, listing = %id, "optimization references missing listing"),
            }
        }

        Ok(listings)
    }
}

impl std::fmt::Debug for OptimizerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizerState")
            .field("orchestrator", &self.inner.orchestrator)
            .finish_non_exhaustive()
    }
}

/// Build the optimization router
///
/// Handlers expect a [`Caller`] request extension, inserted by the
/// server's authentication middleware.
pub fn optimizer_router(state: OptimizerState) -> Router {
    Router::new()
        .route("/api/optimizations", routing::post(create_optimization))
        .route("/api/optimizations/models", routing::get(list_models))
        .route("/api/optimizations/{id}", routing::get(get_optimization))
        .route("/api/optimizations/{id}/regenerate", routing::post(regenerate_listing))
        .with_state(state)
}

/// Held while a record is being rewritten
struct RecordGuard {
    state: OptimizerState,
    id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl RecordGuard {
    async fn release(mut self) {
        self.guard.take();
        self.state.release_record(&self.id).await;
    }
}

/// JSON body extractor whose rejections use the `{detail, type}` error shape
struct JsonBody<T>(T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => Err(error_response(OptimizeError::InvalidRequest(rejection.body_text()))),
        }
    }
}

// -- Wire types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeBody {
    #[serde(default)]
    product: Option<ProductRef>,
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    optimization_focus: Option<String>,
    #[serde(default)]
    target_audience: Option<String>,
    #[serde(default)]
    model_id: Option<String>,
}

/// Only the id of the submitted product is trusted; the rest is reloaded
#[derive(Debug, Deserialize)]
struct ProductRef {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegenerateBody {
    platform: String,
    #[serde(default)]
    model_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizationView {
    id: String,
    user_id: String,
    master_product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimization_focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<Timestamp>,
    optimized_listings: Vec<OptimizedListing>,
    model: Option<ModelSummary>,
    subscription_warning: Option<SubscriptionWarning>,
}

impl OptimizationView {
    fn new(
        record: OptimizationRecord,
        listings: Vec<OptimizedListing>,
        model: Option<ModelSummary>,
        warning: Option<SubscriptionWarning>,
    ) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            master_product_id: record.master_product_id,
            optimization_focus: record.optimization_focus,
            target_audience: record.target_audience,
            created_at: record.created_at,
            updated_at: record.updated_at,
            optimized_listings: listings,
            model,
            subscription_warning: warning,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegenerationView {
    optimized_listing: OptimizedListing,
    model: ModelSummary,
    subscription_warning: Option<SubscriptionWarning>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelView<'a> {
    id: &'a str,
    name: &'a str,
    provider: &'a str,
    description: &'a str,
    tier: SubscriptionTier,
    is_available: bool,
    required_subscription: SubscriptionTier,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelListView<'a> {
    models: Vec<ModelView<'a>>,
    user_subscription: SubscriptionTier,
    default_model: &'a str,
}

// -- Handlers --

/// Handle `GET /api/optimizations/models`
async fn list_models(State(state): State<OptimizerState>, axum::Extension(caller): axum::Extension<Caller>) -> Response {
    let catalog = state.orchestrator().selector().catalog();
    let tier = caller.subscription;

    let models = catalog
        .list_all()
        .iter()
        .map(|model| ModelView {
            id: &model.id,
            name: &model.name,
            provider: &model.provider,
            description: &model.description,
            tier: model.tier,
            is_available: model.available_to(tier),
            required_subscription: model.required_subscription,
        })
        .collect();

    Json(ModelListView {
        models,
        user_subscription: tier,
        default_model: &catalog.default_for(tier).id,
    })
    .into_response()
}

/// Handle `POST /api/optimizations`
async fn create_optimization(
    State(state): State<OptimizerState>,
    axum::Extension(caller): axum::Extension<Caller>,
    JsonBody(body): JsonBody<OptimizeBody>,
) -> Response {
    match optimize(&state, &caller, body).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

async fn optimize(state: &OptimizerState, caller: &Caller, body: OptimizeBody) -> Result<OptimizationView, OptimizeError> {
    let product_id = body
        .product
        .map(|product| product.id)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| OptimizeError::InvalidRequest("product id is required".to_owned()))?;

    let platforms = parse_platforms(&body.platforms)?;
    if platforms.is_empty() {
        return Err(OptimizeError::InvalidRequest("at least one platform is required".to_owned()));
    }

    let product = state.owned_product(caller, &product_id).await?;

    let outcome = state
        .orchestrator()
        .optimize(
            OptimizationRequest {
                product,
                platforms,
                focus: body.optimization_focus.clone(),
                audience: body.target_audience.clone(),
                model_id: body.model_id,
            },
            caller.subscription,
        )
        .await?;

    let mut stored = Vec::with_capacity(outcome.listings.len());
    for listing in outcome.listings {
        stored.push(state.stores().listings.create(listing).await?);
    }

    let created = state
        .stores()
        .optimizations
        .create(OptimizationRecord {
            user_id: caller.id.clone(),
            master_product_id: product_id,
            optimized_listings: stored.iter().map(|listing| listing.id.clone()).collect(),
            optimization_focus: body.optimization_focus,
            target_audience: body.target_audience,
            model_id: Some(outcome.model.id.clone()),
            ..OptimizationRecord::default()
        })
        .await;

    let record = match created {
        Ok(record) => record,
        Err(e) => {
            for listing in &stored {
                state.discard_listing(&listing.id).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        optimization = %record.id,
        user = %caller.id,
        listings = stored.len(),
        "stored optimization"
    );

    Ok(OptimizationView::new(record, stored, Some(outcome.model), outcome.warning))
}

/// Handle `GET /api/optimizations/{id}`
async fn get_optimization(
    State(state): State<OptimizerState>,
    axum::Extension(caller): axum::Extension<Caller>,
    Path(id): Path<String>,
) -> Response {
    let result = async {
        let record = state.owned_record(&caller, &id).await?;
        let listings = state.listings(&record).await?;

        let model = record
            .model_id
            .as_deref()
            .and_then(|id| state.orchestrator().selector().catalog().get(id))
            .map(ModelSummary::from);

        Ok::<_, OptimizeError>(OptimizationView::new(record, listings, model, None))
    }
    .await;

    match result {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handle `POST /api/optimizations/{id}/regenerate`
async fn regenerate_listing(
    State(state): State<OptimizerState>,
    axum::Extension(caller): axum::Extension<Caller>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<RegenerateBody>,
) -> Response {
    let guard = state.lock_record(&id).await;
    let result = regenerate(&state, &caller, &id, body).await;
    guard.release().await;

    match result {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

async fn regenerate(
    state: &OptimizerState,
    caller: &Caller,
    id: &str,
    body: RegenerateBody,
) -> Result<RegenerationView, OptimizeError> {
    let platform: Platform = body
        .platform
        .parse()
        .map_err(|e: listsmith_core::ParseError| OptimizeError::InvalidRequest(e.to_string()))?;

    let mut record = state.owned_record(caller, id).await?;
    let product = state.owned_product(caller, &record.master_product_id).await?;

    let regeneration = state
        .orchestrator()
        .regenerate(
            &product,
            platform,
            record.optimization_focus.clone(),
            record.target_audience.clone(),
            body.model_id.as_deref(),
            caller.subscription,
        )
        .await?;

    let listing = state.stores().listings.create(regeneration.listing).await?;

    let mut replaced = None;
    for (index, listing_id) in record.optimized_listings.iter().enumerate() {
        let previous = state.stores().listings.get(listing_id).await?;
        if previous.is_some_and(|previous| previous.platform == platform) {
            replaced = Some(index);
            break;
        }
    }

    let previous = match replaced {
        Some(index) => Some(std::mem::replace(&mut record.optimized_listings[index], listing.id.clone())),
        None => {
            record.optimized_listings.push(listing.id.clone());
            None
        }
    };

    let record_id = record.id.clone();
    let updated = state.stores().optimizations.update(&record_id, record).await;

    match updated {
        Ok(Some(_)) => {}
        Ok(None) => {
            state.discard_listing(&listing.id).await;
            return Err(OptimizeError::OptimizationNotFound);
        }
        Err(e) => {
            state.discard_listing(&listing.id).await;
            return Err(e.into());
        }
    }

    // The record no longer references the replaced listing
    if let Some(previous) = previous {
        state.discard_listing(&previous).await;
    }

    tracing::info!(
        optimization = %record_id,
        platform = %platform,
        listing = %listing.id,
        "regenerated listing"
    );

    Ok(RegenerationView {
        optimized_listing: listing,
        model: regeneration.model,
        subscription_warning: regeneration.warning,
    })
}

/// Parse platform names, rejecting unknown ones
fn parse_platforms(names: &[String]) -> Result<Vec<Platform>, OptimizeError> {
    names
        .iter()
        .map(|name| {
            name.parse::<Platform>()
                .map_err(|e| OptimizeError::InvalidRequest(e.to_string()))
        })
        .collect()
}

#[allow(clippy::needless_pass_by_value)]
fn error_response(error: OptimizeError) -> Response {
    let status = error.status_code();

    if status.is_server_error() {
        tracing::error!(error = %error, "optimization request failed");
    }

    let body = serde_json::json!({
        "detail": error.client_message(),
        "type": error.error_type(),
    });

    (status, Json(body)).into_response()
}
