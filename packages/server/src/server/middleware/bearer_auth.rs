use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::common::ApiError;

/// Shared secret every authenticated request must present.
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Constant-time comparison against the configured secret
    pub fn matches(&self, token: &str) -> bool {
        self.0.as_bytes().ct_eq(token.as_bytes()).into()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Bearer token middleware
///
/// Rejects the request with 401 unless the Authorization header is
/// `Bearer <token>` and the token matches the configured API key.
pub async fn bearer_auth_middleware(
    api_key: Arc<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Err(e) = authorize(&request, &api_key) {
        warn!(path = %request.uri().path(), reason = %e, "Rejected unauthenticated request");
        return e.into_response();
    }

    debug!(path = %request.uri().path(), "Authenticated request");
    next.run(request).await
}

fn authorize(request: &Request<Body>, api_key: &ApiKey) -> Result<(), ApiError> {
    let token = extract_bearer_token(request)?;
    if api_key.matches(token) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Invalid API key"))
    }
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(request: &Request<Body>) -> Result<&str, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("Not authenticated"))?;
    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid authorization header"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::Unauthorized("Invalid authentication credentials"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::Unauthorized("Invalid authentication credentials"));
    }

    Ok(token)
}
