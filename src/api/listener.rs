use crate::api::{ApiError, ApiState};
use crate::world::Bucket;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn create_listener_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/listener/:id",
            get(drain_listener)
                .put(register_listener)
                .post(register_listener),
        )
        .with_state(state)
}

/// PUT|POST /listener/:id - register (or reset) a listener, echoing its id
async fn register_listener(
    State(state): State<Arc<ApiState>>,
    Path(listener_id): Path<String>,
) -> Json<String> {
    Json(state.world.register_listener(&listener_id))
}

/// GET /listener/:id - entities changed since the last poll
async fn drain_listener(
    State(state): State<Arc<ApiState>>,
    Path(listener_id): Path<String>,
) -> Result<Json<Bucket>, ApiError> {
    Ok(Json(state.world.drain_listener(&listener_id)?))
}
