//! Post repository trait

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use super::entity::Post;
use crate::domain::DomainError;

/// Repository trait for post storage
#[async_trait]
pub trait PostRepository: Send + Sync + Debug {
    /// Get a post by its ID
    async fn get(&self, id: &Uuid) -> Result<Option<Post>, DomainError>;

    /// List all posts, oldest first
    async fn list(&self) -> Result<Vec<Post>, DomainError>;

    /// Store a new post
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
}
