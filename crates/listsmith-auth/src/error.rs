use http::StatusCode;
use listsmith_core::HttpError;

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token on the request
    #[error("Not authenticated")]
    MissingToken,

    /// Token does not belong to any known caller
    #[error("invalid token")]
    InvalidToken,
}

impl HttpError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_type(&self) -> &str {
        "authentication_error"
    }

    fn client_message(&self) -> String {
        "Not authenticated".to_owned()
    }
}
