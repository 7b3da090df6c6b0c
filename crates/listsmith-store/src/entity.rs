use jiff::Timestamp;
use listsmith_core::{OptimizationRecord, OptimizedListing, Product};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record that can be kept in an [`EntityStore`](crate::EntityStore)
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the JSON file stem
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Stamp a newly created entity
    fn assign(&mut self, id: String, now: Timestamp);

    /// Carry the identity of `previous` over an update
    fn carry_over(&mut self, previous: &Self, now: Timestamp);
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, now: Timestamp) {
        self.id = id;
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    fn carry_over(&mut self, previous: &Self, now: Timestamp) {
        self.id.clone_from(&previous.id);
        self.created_at = previous.created_at;
        self.updated_at = Some(now);
    }
}

impl Entity for OptimizedListing {
    const COLLECTION: &'static str = "optimized_listings";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, now: Timestamp) {
        self.id = id;
        self.created_at = Some(now);
    }

    fn carry_over(&mut self, previous: &Self, _now: Timestamp) {
        self.id.clone_from(&previous.id);
        self.created_at = previous.created_at;
    }
}

impl Entity for OptimizationRecord {
    const COLLECTION: &'static str = "optimizations";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, now: Timestamp) {
        self.id = id;
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    fn carry_over(&mut self, previous: &Self, now: Timestamp) {
        self.id.clone_from(&previous.id);
        self.created_at = previous.created_at;
        self.updated_at = Some(now);
    }
}

/// Fresh random entity id
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
