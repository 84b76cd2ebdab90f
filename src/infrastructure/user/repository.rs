//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{User, UserRepository};

/// In-memory implementation of UserRepository, keyed by username.
///
/// Stands in for the external user store; also serves as the test double
/// for token subject resolution.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (user.username().to_string(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        users.insert(user.username().to_string(), user.clone());

        Ok(user)
    }
}
