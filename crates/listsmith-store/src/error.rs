use http::StatusCode;
use listsmith_core::HttpError;
use thiserror::Error;

/// Storage backend failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a collection file failed
    #[error("storage I/O error on {collection}: {source}")]
    Io {
        collection: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A collection file holds something other than a JSON array of entities
    #[error("corrupt {collection} collection: {source}")]
    Corrupt {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError for StoreError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_type(&self) -> &str {
        "storage_error"
    }

    fn client_message(&self) -> String {
        "a storage error occurred".to_owned()
    }
}
