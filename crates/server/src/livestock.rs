//! Livestock and health record endpoints.

use api_types::livestock::{HealthRecordListQuery, LivestockListQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{
    HealthRecord, HealthRecordNew, HealthRecordUpdate, Livestock, LivestockFilter, LivestockNew,
    LivestockUpdate,
};
use uuid::Uuid;

use crate::{ServerError, parse_optional, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<LivestockListQuery>,
) -> Result<Json<Vec<Livestock>>, ServerError> {
    let filter = LivestockFilter {
        species: query
            .species
            .map(|species| species.trim().to_string())
            .filter(|species| !species.is_empty()),
        status: parse_optional(query.status.as_deref())?,
    };
    Ok(Json(state.engine.list_livestock(&filter).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LivestockNew>,
) -> Result<(StatusCode, Json<Livestock>), ServerError> {
    let animal = state.engine.new_livestock(payload).await?;
    tracing::info!(livestock_id = %animal.id, tag = %animal.tag_number, "animal registered");
    Ok((StatusCode::CREATED, Json(animal)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(livestock_id): Path<Uuid>,
) -> Result<Json<Livestock>, ServerError> {
    Ok(Json(state.engine.livestock(livestock_id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(livestock_id): Path<Uuid>,
    Json(payload): Json<LivestockUpdate>,
) -> Result<Json<Livestock>, ServerError> {
    Ok(Json(
        state.engine.update_livestock(livestock_id, payload).await?,
    ))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(livestock_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_livestock(livestock_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health history of one animal.
pub async fn animal_health_records(
    State(state): State<ServerState>,
    Path(livestock_id): Path<Uuid>,
) -> Result<Json<Vec<HealthRecord>>, ServerError> {
    Ok(Json(state.engine.health_records_for(livestock_id).await?))
}

pub async fn list_health_records(
    State(state): State<ServerState>,
    Query(query): Query<HealthRecordListQuery>,
) -> Result<Json<Vec<HealthRecord>>, ServerError> {
    Ok(Json(state.engine.list_health_records(query.since).await?))
}

pub async fn create_health_record(
    State(state): State<ServerState>,
    Json(payload): Json<HealthRecordNew>,
) -> Result<(StatusCode, Json<HealthRecord>), ServerError> {
    let record = state.engine.new_health_record(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_health_record(
    State(state): State<ServerState>,
    Path(record_id): Path<Uuid>,
) -> Result<Json<HealthRecord>, ServerError> {
    Ok(Json(state.engine.health_record(record_id).await?))
}

pub async fn update_health_record(
    State(state): State<ServerState>,
    Path(record_id): Path<Uuid>,
    Json(payload): Json<HealthRecordUpdate>,
) -> Result<Json<HealthRecord>, ServerError> {
    Ok(Json(
        state.engine.update_health_record(record_id, payload).await?,
    ))
}

pub async fn delete_health_record(
    State(state): State<ServerState>,
    Path(record_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_health_record(record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
