//! Application state for shared services

use std::sync::Arc;

use crate::domain::{PostRepository, UserRepository};
use crate::infrastructure::auth::TokenService;
use crate::infrastructure::user::UserService;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub user_service: Arc<UserService>,
    pub token_service: Arc<TokenService>,
}

/// State backed by in-memory repositories and an ephemeral key pair
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use chrono::Duration;
    use jsonwebtoken::Algorithm;

    use crate::infrastructure::auth::test_key_pair;
    use crate::infrastructure::post::InMemoryPostRepository;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository};

    let users = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(Argon2Hasher::new());
    let token_service = Arc::new(
        TokenService::new(test_key_pair(), Algorithm::RS256, Duration::minutes(60))
            .expect("token service from test key pair"),
    );

    AppState {
        users: users.clone(),
        posts: Arc::new(InMemoryPostRepository::new()),
        user_service: Arc::new(UserService::new(users, hasher)),
        token_service,
    }
}
