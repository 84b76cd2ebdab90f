//! Router assembly

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::AppState;
use super::{auth, health, posts};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth::create_auth_router())
        .nest("/posts", posts::create_posts_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
