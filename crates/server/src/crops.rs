//! Crop and crop cycle endpoints.

use api_types::crop::CycleListQuery;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Crop, CropCycle, CropCycleNew, CropCycleUpdate, CropNew, CropUpdate, CycleStatus};
use uuid::Uuid;

use crate::{ServerError, parse_optional, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Crop>>, ServerError> {
    Ok(Json(state.engine.list_crops().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CropNew>,
) -> Result<(StatusCode, Json<Crop>), ServerError> {
    let crop = state.engine.new_crop(payload).await?;
    tracing::info!(crop_id = %crop.id, name = %crop.name, "crop created");
    Ok((StatusCode::CREATED, Json(crop)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(crop_id): Path<Uuid>,
) -> Result<Json<Crop>, ServerError> {
    Ok(Json(state.engine.crop(crop_id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(crop_id): Path<Uuid>,
    Json(payload): Json<CropUpdate>,
) -> Result<Json<Crop>, ServerError> {
    Ok(Json(state.engine.update_crop(crop_id, payload).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(crop_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_crop(crop_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_cycles(
    State(state): State<ServerState>,
    Query(query): Query<CycleListQuery>,
) -> Result<Json<Vec<CropCycle>>, ServerError> {
    let status: Option<CycleStatus> = parse_optional(query.status.as_deref())?;
    Ok(Json(state.engine.list_crop_cycles(status).await?))
}

pub async fn create_cycle(
    State(state): State<ServerState>,
    Json(payload): Json<CropCycleNew>,
) -> Result<(StatusCode, Json<CropCycle>), ServerError> {
    let cycle = state.engine.new_crop_cycle(payload).await?;
    Ok((StatusCode::CREATED, Json(cycle)))
}

pub async fn get_cycle(
    State(state): State<ServerState>,
    Path(cycle_id): Path<Uuid>,
) -> Result<Json<CropCycle>, ServerError> {
    Ok(Json(state.engine.crop_cycle(cycle_id).await?))
}

pub async fn update_cycle(
    State(state): State<ServerState>,
    Path(cycle_id): Path<Uuid>,
    Json(payload): Json<CropCycleUpdate>,
) -> Result<Json<CropCycle>, ServerError> {
    Ok(Json(state.engine.update_crop_cycle(cycle_id, payload).await?))
}

pub async fn delete_cycle(
    State(state): State<ServerState>,
    Path(cycle_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_crop_cycle(cycle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
