//! Post endpoints
//!
//! Reads are public; creating a post requires a valid access token.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::Post;

/// Create the posts router
pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{post_id}", get(get_post))
}

/// Request body for creating a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Post as exposed over the API
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id(),
            title: post.title().to_string(),
            author: post.author().to_string(),
            content: post.content().to_string(),
            created_at: post.created_at(),
        }
    }
}

/// List all posts
///
/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state.posts.list().await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Fetch a single post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .posts
        .get(&post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Post '{}' not found", post_id)))?;

    Ok(Json(post.into()))
}

/// Create a post as the authenticated user
///
/// POST /posts
pub async fn create_post(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("Post title cannot be empty"));
    }

    let post = state
        .posts
        .create(Post::new(request.title, request.content, user.username()))
        .await?;

    info!(author = %post.author(), post_id = %post.id(), "Created post");

    Ok(Json(post.into()))
}
