//! Password hashing using Argon2

use argon2::{
    Argon2, Params,
    password_hash::{
        PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored hash.
    ///
    /// Mismatch and malformed hashes both return false, never an error.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2-based password hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with the default cost parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with explicit cost parameters (memory in KiB,
    /// iterations, parallelism)
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, DomainError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| DomainError::configuration(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        )
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
