//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record for authentication.
///
/// The username doubles as the lookup identifier for login and for
/// resolving token subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Username for login, unique across the user store
    username: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from a username and an already-hashed password
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("alice", "$argon2id$v=19$m=19456,t=2,p=1$abc$def");
        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("alice"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_getters() {
        let user = User::new("bob", "hash");

        assert_eq!(user.username(), "bob");
        assert_eq!(user.password_hash(), "hash");
    }
}
