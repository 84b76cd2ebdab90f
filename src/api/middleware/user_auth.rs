//! Bearer token authentication for privileged routes

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::User;

/// Extractor that requires a valid bearer token.
///
/// Verifies the token from the Authorization header and resolves its
/// subject to a stored user. Privileged handlers take this extractor to
/// obtain a trusted identity; any verification failure surfaces as a
/// uniform 401.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Verifying access token");

        let user = state
            .token_service
            .authenticate(&token, state.users.as_ref())
            .await?;

        Ok(RequireUser(user))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    ))
}
