//! Authentication error types

use thiserror::Error;

/// Errors produced by the key store and token service.
///
/// `KeyLoad` and `KeyPersist` are startup-fatal: the process cannot serve
/// traffic without key material. `Signing` is fatal for the issuing request
/// only. `InvalidToken` is recoverable and carries no detail: signature
/// failure, expiry and unknown-subject rejections are indistinguishable to
/// callers.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to load key material: {message}")]
    KeyLoad { message: String },

    #[error("Failed to persist key material: {message}")]
    KeyPersist { message: String },

    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error("Invalid credentials")]
    InvalidToken,
}

impl AuthError {
    pub fn key_load(message: impl Into<String>) -> Self {
        Self::KeyLoad {
            message: message.into(),
        }
    }

    pub fn key_persist(message: impl Into<String>) -> Self {
        Self::KeyPersist {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }
}
