use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Subscription level attached to a caller
///
/// Variant order is the access order: `Free < Basic < Pro < Enterprise`.
/// Comparisons always go through the derived `Ord`, never through the
/// tier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Basic,
    Pro,
    Enterprise,
}

impl SubscriptionTier {
    /// All tiers in ascending order
    pub const ALL: [Self; 4] = [Self::Free, Self::Basic, Self::Pro, Self::Enterprise];

    /// Lowercase wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }

    /// Whether a caller on this tier may use something gated at `required`
    pub fn permits(self, required: Self) -> bool {
        required <= self
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownTier(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_access_level() {
        assert!(SubscriptionTier::Free < SubscriptionTier::Basic);
        assert!(SubscriptionTier::Basic < SubscriptionTier::Pro);
        assert!(SubscriptionTier::Pro < SubscriptionTier::Enterprise);
    }

    #[test]
    fn permits_is_inclusive() {
        assert!(SubscriptionTier::Pro.permits(SubscriptionTier::Pro));
        assert!(SubscriptionTier::Pro.permits(SubscriptionTier::Free));
        assert!(!SubscriptionTier::Pro.permits(SubscriptionTier::Enterprise));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Enterprise".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Enterprise);
        assert_eq!(" basic ".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Basic);
        assert!("platinum".parse::<SubscriptionTier>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionTier::Pro).unwrap();
        assert_eq!(json, "\"pro\"");
    }
}
