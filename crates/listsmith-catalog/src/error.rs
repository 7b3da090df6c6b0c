use http::StatusCode;
use listsmith_core::HttpError;
use thiserror::Error;

/// Strict catalog lookup failures
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No descriptor carries this id
    #[error("model not found: {0}")]
    NotFound(String),
}

impl HttpError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::NotFound(_) => "model_not_found",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
