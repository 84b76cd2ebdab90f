//! In-memory post repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::post::{Post, PostRepository};

/// In-memory implementation of PostRepository
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl InMemoryPostRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn get(&self, id: &Uuid) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;

        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by_key(|post| post.created_at());

        Ok(all)
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;
        posts.insert(post.id(), post.clone());

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryPostRepository::new();

        let post = repo
            .create(Post::new("Hello", "First post", "alice"))
            .await
            .unwrap();

        let found = repo.get(&post.id()).await.unwrap().unwrap();
        assert_eq!(found.title(), "Hello");

        assert!(repo.get(&Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let repo = InMemoryPostRepository::new();

        let first = repo.create(Post::new("One", "x", "alice")).await.unwrap();
        let second = repo.create(Post::new("Two", "y", "bob")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at() <= all[1].created_at());
        assert_eq!(
            [all[0].id(), all[1].id()].iter().collect::<std::collections::HashSet<_>>(),
            [first.id(), second.id()].iter().collect()
        );
    }
}
