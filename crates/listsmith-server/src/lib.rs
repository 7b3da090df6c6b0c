//! HTTP server assembly for Listsmith

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod cors;
mod health;
mod products;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use listsmith_auth::{IdentityProvider, StaticTokenIdentity};
use listsmith_catalog::{ModelCatalog, ModelSelector};
use listsmith_config::Config;
use listsmith_llm::ProviderFactory;
use listsmith_optimizer::Orchestrator;
use listsmith_optimizer::http::OptimizerState;
use listsmith_store::Stores;
use tower_http::trace::TraceLayer;

pub use products::ProductError;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if provider clients cannot be built or storage
    /// cannot be opened
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let stores = Stores::open(&config.storage).await?;
        let identity = StaticTokenIdentity::from_config(&config.identity);

        if identity.is_empty() {
            tracing::warn!("no identities configured, every API request will be rejected");
        }

        Self::with_parts(config, stores, Arc::new(identity))
    }

    /// Build the server around existing storage and identity provider
    ///
    /// # Errors
    ///
    /// Returns an error if provider clients cannot be built
    pub fn with_parts(config: Config, stores: Stores, identity: Arc<dyn IdentityProvider>) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let catalog = Arc::new(ModelCatalog::from_config(&config.catalog));
        tracing::info!(models = catalog.len(), "model catalog loaded");

        let providers = ProviderFactory::from_config(&config.providers)?;
        let orchestrator = Orchestrator::new(ModelSelector::new(catalog), providers);

        let mut app = Router::new()
            .merge(listsmith_optimizer::http::optimizer_router(OptimizerState::new(
                orchestrator,
                stores.clone(),
            )))
            .merge(products::product_router(stores));

        // Authentication (innermost, runs just before handlers)
        let public_paths: Arc<[String]> = config.identity.public_paths.into();
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let identity = Arc::clone(&identity);
            let public_paths = Arc::clone(&public_paths);
            async move { auth::auth_middleware(identity, public_paths, req, next).await }
        }));

        // Health check sits outside authentication
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode};
    use listsmith_config::StorageConfig;
    use listsmith_core::{Caller, SubscriptionTier};
    use tower::ServiceExt;

    use super::*;

    fn server() -> Server {
        let config = Config {
            storage: StorageConfig::Memory,
            ..Config::default()
        };

        let identity = StaticTokenIdentity::default().with_caller(
            "seller-token",
            Caller {
                id: "u-1".to_owned(),
                email: "seller@example.com".to_owned(),
                subscription: SubscriptionTier::Basic,
            },
        );

        Server::with_parts(config, Stores::in_memory(), Arc::new(identity)).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = server()
            .into_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_requires_token() {
        let response = server()
            .into_router()
            .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let response = server()
            .into_router()
            .oneshot(
                Request::get("/api/optimizations/models")
                    .header("authorization", "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn known_token_reaches_handlers() {
        let response = server()
            .into_router()
            .oneshot(
                Request::get("/api/products")
                    .header("authorization", "Bearer seller-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn untitled_products_are_rejected() {
        let response = server()
            .into_router()
            .oneshot(
                Request::post("/api/products")
                    .header("authorization", "Bearer seller-token")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_product_body_uses_error_shape() {
        let response = server()
            .into_router()
            .oneshot(
                Request::post("/api/products")
                    .header("authorization", "Bearer seller-token")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title": 42}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["type"], "invalid_request_error");
        assert!(body["detail"].is_string());
    }
}
