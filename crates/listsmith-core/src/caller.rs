use serde::{Deserialize, Serialize};

use crate::SubscriptionTier;

/// Authenticated caller attached to a request by the identity layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caller {
    /// Stable user identifier, used for ownership checks
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Tier that gates model access
    #[serde(rename = "subscriptionPlan")]
    pub subscription: SubscriptionTier,
}

impl Caller {
    /// Whether this caller owns a record stamped with `user_id`
    pub fn owns(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.id == user_id
    }
}
