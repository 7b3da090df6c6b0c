use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// turns these into `{ "detail", "type" }` bodies, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Failure to parse one of the closed vocabularies (tiers, platforms)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not one of `free`, `basic`, `pro`, `enterprise`
    #[error("unknown subscription tier: {0}")]
    UnknownTier(String),

    /// Not one of the supported marketplaces
    #[error("unsupported platform: {0}")]
    UnknownPlatform(String),
}
