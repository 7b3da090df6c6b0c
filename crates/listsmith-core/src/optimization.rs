use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Persisted outcome of one optimization run
///
/// Listings are stored separately and referenced by id so a single
/// platform can be regenerated without rewriting the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRecord {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub master_product_id: String,
    /// Ids of the stored optimized listings, one per platform
    pub optimized_listings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    /// Catalog id of the model that produced the listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}
