//! Entity persistence for Listsmith
//!
//! Products, optimized listings and optimization records live in
//! per-collection stores keyed by a generated id. Two backends share the
//! [`EntityStore`] trait: process-local maps and one JSON array file per
//! collection.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod entity;
pub mod error;
mod json;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use listsmith_config::StorageConfig;
use listsmith_core::{OptimizationRecord, OptimizedListing, Product};

pub use entity::Entity;
pub use error::StoreError;
pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Predicate passed to [`EntityStore::search`]
pub type Filter<'a, E> = &'a (dyn Fn(&E) -> bool + Send + Sync);

/// Keyed storage for one entity collection
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Fetch by id
    async fn get(&self, id: &str) -> Result<Option<E>, StoreError>;

    /// Insert with a fresh id and timestamps, returning the stored value
    async fn create(&self, entity: E) -> Result<E, StoreError>;

    /// Every entity matching `filter`, in insertion order
    async fn search(&self, filter: Filter<'_, E>) -> Result<Vec<E>, StoreError>;

    /// Replace the entity stored under `id`
    ///
    /// The id and creation time are preserved. Returns `None` when no
    /// entity has that id.
    async fn update(&self, id: &str, entity: E) -> Result<Option<E>, StoreError>;

    /// Remove by id, returning whether anything was removed
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// The three collections the service persists
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn EntityStore<Product>>,
    pub listings: Arc<dyn EntityStore<OptimizedListing>>,
    pub optimizations: Arc<dyn EntityStore<OptimizationRecord>>,
}

impl Stores {
    /// Open every collection with the configured backend
    pub async fn open(config: &StorageConfig) -> anyhow::Result<Self> {
        match config {
            StorageConfig::Memory => {
                tracing::info!("using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageConfig::Json { data_dir } => {
                tracing::info!(data_dir = %data_dir.display(), "using JSON file storage");

                Ok(Self {
                    products: Arc::new(JsonFileStore::<Product>::open(data_dir).await?),
                    listings: Arc::new(JsonFileStore::<OptimizedListing>::open(data_dir).await?),
                    optimizations: Arc::new(JsonFileStore::<OptimizationRecord>::open(data_dir).await?),
                })
            }
        }
    }

    /// Fresh empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            products: Arc::new(MemoryStore::<Product>::new()),
            listings: Arc::new(MemoryStore::<OptimizedListing>::new()),
            optimizations: Arc::new(MemoryStore::<OptimizationRecord>::new()),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
