//! User infrastructure: password hashing, storage and registration

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryUserRepository;
pub use service::UserService;
