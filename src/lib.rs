//! Postboard API
//!
//! A small posting service gated by RSA-signed access tokens:
//! - an asymmetric key pair persisted across restarts (generated on first
//!   start, loaded ever after)
//! - stateless bearer tokens with a bounded lifetime
//! - salted password hashing for stored credentials

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::auth::{KeyPair, TokenService, signing_algorithm};
use infrastructure::post::InMemoryPostRepository;
use infrastructure::user::{Argon2Hasher, InMemoryUserRepository, UserService};

/// Build the application state from configuration.
///
/// Obtains the signing key pair before anything else; failing to load or
/// persist key material is fatal since the service cannot issue or verify
/// a single token without it.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let keys = KeyPair::obtain(&config.auth.private_key_file, &config.auth.public_key_file)?;
    let algorithm = signing_algorithm(&config.auth.algorithm)?;
    let token_service = Arc::new(TokenService::new(&keys, algorithm, config.auth.token_ttl())?);

    let users = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(Argon2Hasher::new());
    let user_service = Arc::new(UserService::new(users.clone(), hasher));
    let posts = Arc::new(InMemoryPostRepository::new());

    Ok(AppState {
        users,
        posts,
        user_service,
        token_service,
    })
}
