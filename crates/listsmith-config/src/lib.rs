#![allow(clippy::must_use_candidate)]

pub mod catalog;
pub mod cors;
mod env;
pub mod health;
pub mod identity;
mod loader;
pub mod providers;
pub mod server;
pub mod storage;
pub mod telemetry;

use serde::Deserialize;

pub use catalog::*;
pub use cors::*;
pub use health::*;
pub use identity::*;
pub use providers::*;
pub use server::*;
pub use storage::*;
pub use telemetry::*;

/// Top-level Listsmith configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// LLM provider credentials and endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Model catalog override
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Known callers and their subscription tiers
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Entity storage backend
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
