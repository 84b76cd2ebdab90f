//! Request middleware and extractors

mod user_auth;

pub use user_auth::{RequireUser, extract_bearer_token};
