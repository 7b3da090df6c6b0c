//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use listsmith_config::{Config, HealthConfig, ProviderConfig, ServerConfig, StorageConfig, UserConfig};
use listsmith_core::SubscriptionTier;
use secrecy::SecretString;

/// Token of the free-tier seller
pub const FREE_TOKEN: &str = "free-seller-token";
/// Token of the enterprise seller
pub const ENTERPRISE_TOKEN: &str = "enterprise-seller-token";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder with in-memory storage and two sellers
    pub fn new() -> Self {
        let mut config = Config {
            server: ServerConfig {
                listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                health: HealthConfig {
                    enabled: true,
                    ..HealthConfig::default()
                },
                ..ServerConfig::default()
            },
            storage: StorageConfig::Memory,
            ..Config::default()
        };

        config.identity.users = vec![
            user("free-seller", SubscriptionTier::Free, FREE_TOKEN),
            user("enterprise-seller", SubscriptionTier::Enterprise, ENTERPRISE_TOKEN),
        ];

        Self { config }
    }

    /// Point every provider at a mock backend
    pub fn with_mock_providers(mut self, base_url: &str) -> Self {
        let provider = || ProviderConfig {
            api_key: Some(SecretString::from("test-key".to_owned())),
            base_url: Some(base_url.parse().expect("valid URL")),
            timeout: Some("5s".to_owned()),
        };

        self.config.providers.openai = Some(provider());
        self.config.providers.anthropic = Some(provider());
        self.config.providers.deepseek = Some(provider());
        self
    }

    /// Persist entities as JSON files under `dir`
    pub fn with_json_storage(mut self, dir: &Path) -> Self {
        self.config.storage = StorageConfig::Json {
            data_dir: dir.to_path_buf(),
        };
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}

fn user(id: &str, subscription: SubscriptionTier, token: &str) -> UserConfig {
    UserConfig {
        id: id.to_owned(),
        email: format!("{id}@example.com"),
        subscription,
        token: SecretString::from(token.to_owned()),
    }
}
