//! Minimal product endpoints backing the optimizer

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use http::StatusCode;
use listsmith_core::{Caller, HttpError, Product};
use listsmith_store::{Stores, StoreError};

/// Errors from the product endpoints
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("invalid product: {0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl HttpError for ProductError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Storage(e) => e.status_code(),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Invalid(_) => "invalid_request_error",
            Self::Storage(e) => e.error_type(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Invalid(_) => self.to_string(),
            Self::Storage(e) => e.client_message(),
        }
    }
}

pub fn product_router(stores: Stores) -> Router {
    Router::new()
        .route("/api/products", routing::post(create_product).get(list_products))
        .with_state(stores)
}

/// Handle `POST /api/products`
async fn create_product(
    State(stores): State<Stores>,
    axum::Extension(caller): axum::Extension<Caller>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Response {
    let mut product = match payload {
        Ok(Json(product)) => product,
        Err(rejection) => return error_response(ProductError::Invalid(rejection.body_text())),
    };

    if product.title.trim().is_empty() {
        return error_response(ProductError::Invalid("title is required".to_owned()));
    }

    product.user_id.clone_from(&caller.id);

    match stores.products.create(product).await {
        Ok(product) => {
            tracing::info!(product = %product.id, user = %caller.id, "created product");
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// Handle `GET /api/products`
async fn list_products(State(stores): State<Stores>, axum::Extension(caller): axum::Extension<Caller>) -> Response {
    let owned = |product: &Product| caller.owns(&product.user_id);

    match stores.products.search(&owned).await {
        Ok(products) => Json(products).into_response(),
        Err(e) => error_response(e.into()),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn error_response(error: ProductError) -> Response {
    if error.status_code().is_server_error() {
        tracing::error!(error = %error, "product request failed");
    }

    let body = serde_json::json!({
        "detail": error.client_message(),
        "type": error.error_type(),
    });

    (error.status_code(), Json(body)).into_response()
}
