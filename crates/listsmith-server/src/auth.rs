use std::sync::Arc;

use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use listsmith_auth::{AuthError, IdentityProvider, bearer_token};
use listsmith_core::HttpError;

/// Authenticate requests with a bearer token
///
/// Public paths pass through untouched. Every other request must carry a
/// token the identity provider recognizes; the resolved caller is stored
/// as a request extension for the handlers.
pub async fn auth_middleware(
    identity: Arc<dyn IdentityProvider>,
    public_paths: Arc<[String]>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if public_paths.iter().any(|p| path == p || path.starts_with(&format!("{}/", p.trim_end_matches('/')))) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        return unauthorized(&AuthError::MissingToken);
    };

    match identity.resolve(token).await {
        Ok(caller) => {
            tracing::debug!(user = %caller.id, tier = %caller.subscription, "authenticated caller");
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "bearer authentication failed");
            unauthorized(&e)
        }
    }
}

fn unauthorized(error: &AuthError) -> Response {
    let body = serde_json::json!({
        "detail": error.client_message(),
        "type": error.error_type(),
    });

    (error.status_code(), Json(body)).into_response()
}
