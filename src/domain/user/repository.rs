//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for the external user store.
///
/// The authentication core only ever reads through `find_by_username` and
/// writes a freshly hashed credential through `create`.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Look up a user by username (the login identifier)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Store a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}
