//! User service for registration and credential checks

use std::sync::Arc;

use tracing::debug;

use crate::domain::DomainError;
use crate::domain::user::{User, UserRepository, validate_password, validate_username};

use super::password::PasswordHasher;

/// User service handling registration and login credential checks
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user, storing a freshly hashed password.
    ///
    /// The plaintext never leaves this method.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.username_exists(username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let password_hash = self.hasher.hash(password)?;

        self.repository.create(User::new(username, password_hash)).await
    }

    /// Check credentials against the stored hash.
    ///
    /// Returns `None` on unknown username or password mismatch; callers
    /// cannot tell the two apart.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.find_by_username(username).await? {
            Some(user) => user,
            None => {
                debug!(username, "login attempt for unknown username");
                return Ok(None);
            }
        };

        if !self.hasher.verify(password, user.password_hash()) {
            debug!(username, "login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }
}
