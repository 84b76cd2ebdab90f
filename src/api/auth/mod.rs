//! Authentication endpoints: registration and token-based login

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Username and password, used by both registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
}

/// Login response.
///
/// `ok` is false (and the token absent) on unknown username or wrong
/// password; the body never says which.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let user = state
        .user_service
        .register(&request.username, &request.password)
        .await?;

    info!(username = %user.username(), "Registered new user");

    Ok(Json(RegisterResponse { ok: true }))
}

/// Login with username and password
///
/// POST /auth/login
///
/// Returns a signed access token on success.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?;

    match user {
        Some(user) => {
            let token = state.token_service.issue_for(user.username())?;

            info!(username = %user.username(), "Issued access token");

            Ok(Json(LoginResponse {
                ok: true,
                token: Some(token),
            }))
        }
        None => Ok(Json(LoginResponse {
            ok: false,
            token: None,
        })),
    }
}
