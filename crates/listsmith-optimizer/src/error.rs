use http::StatusCode;
use listsmith_core::HttpError;
use listsmith_store::StoreError;
use thiserror::Error;

/// Errors surfaced by optimization requests
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Empty platform set, unknown platform, or incomplete product
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing product, or one owned by another caller
    #[error("Product not found or access denied")]
    ProductNotFound,

    /// Missing optimization, or one owned by another caller
    #[error("Optimization not found or access denied")]
    OptimizationNotFound,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl HttpError for OptimizeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProductNotFound | Self::OptimizationNotFound => StatusCode::NOT_FOUND,
            Self::Storage(e) => e.status_code(),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::ProductNotFound | Self::OptimizationNotFound => "not_found_error",
            Self::Storage(e) => e.error_type(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Storage(e) => e.client_message(),
            other => other.to_string(),
        }
    }
}
