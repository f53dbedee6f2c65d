// HTTP adapter: routes requests onto WorldService operations

pub mod body;
mod entity;
mod error;
mod listener;
mod world;

pub use error::ApiError;

use crate::world::WorldService;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Shared application state
pub struct ApiState {
    pub world: Arc<WorldService>,
    /// Requests with larger bodies are rejected with 413
    pub body_size_limit: usize,
}

/// Build the full router: entity, world, listener and static routes
pub fn create_router(state: ApiState, static_dir: &Path) -> Router {
    let body_limit = DefaultBodyLimit::max(state.body_size_limit);
    let state = Arc::new(state);

    Router::new()
        .route("/", get(index))
        .merge(entity::create_entity_router(state.clone()))
        .merge(world::create_world_router(state.clone()))
        .merge(listener::create_listener_router(state))
        .nest_service("/static", ServeDir::new(static_dir))
        // Extractors stop reading once the configured size is exceeded
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// GET / - send browsers to the bundled client
async fn index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/static/index.html")])
}
