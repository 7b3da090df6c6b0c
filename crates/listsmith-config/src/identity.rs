use listsmith_core::SubscriptionTier;
use secrecy::SecretString;
use serde::Deserialize;

/// Static caller registry
///
/// Each user authenticates with a bearer token. Token issuance lives
/// outside this service.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    #[serde(default)]
    pub users: Vec<UserConfig>,
    /// Paths that skip authentication
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            public_paths: default_public_paths(),
        }
    }
}

/// A known caller
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subscription: SubscriptionTier,
    pub token: SecretString,
}

fn default_public_paths() -> Vec<String> {
    vec!["/health".to_owned()]
}
