use crate::api::{body, ApiError, ApiState};
use crate::world::World;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn create_world_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/world", get(get_world).post(replace_world))
        .route("/clear", get(clear).post(clear))
        .with_state(state)
}

/// GET /world - every entity
async fn get_world(State(state): State<Arc<ApiState>>) -> Json<World> {
    Json(state.world.get_world())
}

/// POST /world - install a new world without notifying listeners
async fn replace_world(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<World>, ApiError> {
    let payload = payload?;
    let value = body::parse_json(&headers, &payload, state.body_size_limit)?;
    let world = body::world(value)?;

    state.world.replace_world(world);
    Ok(Json(state.world.get_world()))
}

/// GET|POST /clear - empty the world
async fn clear(State(state): State<Arc<ApiState>>) -> Json<World> {
    Json(state.world.reset())
}
