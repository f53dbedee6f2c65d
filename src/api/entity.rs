use crate::api::{body, ApiError, ApiState};
use crate::world::Record;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::HeaderMap,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn create_entity_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/entity/:entity",
            get(get_entity).put(set_entity).post(update_entity),
        )
        .with_state(state)
}

/// PUT /entity/:entity - replace the whole record
async fn set_entity(
    State(state): State<Arc<ApiState>>,
    Path(entity_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<Record>, ApiError> {
    let payload = payload?;
    let value = body::parse_json(&headers, &payload, state.body_size_limit)?;
    let record = body::entity_record(value)?;

    Ok(Json(state.world.set_entity(&entity_id, record)))
}

/// POST /entity/:entity - merge the given fields into the record
async fn update_entity(
    State(state): State<Arc<ApiState>>,
    Path(entity_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<Record>, ApiError> {
    let payload = payload?;
    let value = body::parse_json(&headers, &payload, state.body_size_limit)?;
    let fields = body::entity_record(value)?;

    Ok(Json(state.world.update_entity(&entity_id, fields)))
}

/// GET /entity/:entity - current record, `{}` for unknown entities
async fn get_entity(
    State(state): State<Arc<ApiState>>,
    Path(entity_id): Path<String>,
) -> Json<Record> {
    Json(state.world.get_entity(&entity_id))
}
