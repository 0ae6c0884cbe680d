//! Operator token middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::AppState;

/// Hex SHA-256 of a bearer token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the bearer token from the Authorization header
fn extract_bearer(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Operator authentication middleware
///
/// Lets the request through only when the bearer token hashes to the
/// configured digest. With no digest configured every request is refused.
pub async fn operator_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state
        .config
        .operator_token_sha256
        .as_deref()
        .ok_or(AppError::Unauthorized)?;
    let token = extract_bearer(&request).ok_or(AppError::Unauthorized)?;

    if hash_token(token) != expected {
        tracing::warn!(path = %request.uri().path(), "Rejected operator token");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
