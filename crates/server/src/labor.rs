//! Worker and work log endpoints.

use api_types::labor::{WorkLogListQuery, WorkerListQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{
    LaborEntry, LaborEntryNew, LaborEntryUpdate, WorkLogFilter, Worker, WorkerNew, WorkerStatus,
    WorkerUpdate,
};
use uuid::Uuid;

use crate::{ServerError, parse_optional, server::ServerState};

pub async fn list_workers(
    State(state): State<ServerState>,
    Query(query): Query<WorkerListQuery>,
) -> Result<Json<Vec<Worker>>, ServerError> {
    let status: Option<WorkerStatus> = parse_optional(query.status.as_deref())?;
    Ok(Json(state.engine.list_workers(status).await?))
}

pub async fn create_worker(
    State(state): State<ServerState>,
    Json(payload): Json<WorkerNew>,
) -> Result<(StatusCode, Json<Worker>), ServerError> {
    let worker = state.engine.new_worker(payload).await?;
    tracing::info!(worker_id = %worker.id, "worker hired");
    Ok((StatusCode::CREATED, Json(worker)))
}

pub async fn get_worker(
    State(state): State<ServerState>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<Worker>, ServerError> {
    Ok(Json(state.engine.worker(worker_id).await?))
}

pub async fn update_worker(
    State(state): State<ServerState>,
    Path(worker_id): Path<Uuid>,
    Json(payload): Json<WorkerUpdate>,
) -> Result<Json<Worker>, ServerError> {
    Ok(Json(state.engine.update_worker(worker_id, payload).await?))
}

pub async fn delete_worker(
    State(state): State<ServerState>,
    Path(worker_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_worker(worker_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Work logs of one worker, newest first.
pub async fn worker_work_logs(
    State(state): State<ServerState>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<Vec<LaborEntry>>, ServerError> {
    // 404 for an unknown worker rather than an empty list.
    state.engine.worker(worker_id).await?;
    let filter = WorkLogFilter {
        worker_id: Some(worker_id),
        ..Default::default()
    };
    Ok(Json(state.engine.list_labor_entries(&filter).await?))
}

pub async fn list_work_logs(
    State(state): State<ServerState>,
    Query(query): Query<WorkLogListQuery>,
) -> Result<Json<Vec<LaborEntry>>, ServerError> {
    let filter = WorkLogFilter {
        worker_id: query.worker_id,
        from: query.start_date,
        to: query.end_date,
    };
    Ok(Json(state.engine.list_labor_entries(&filter).await?))
}

pub async fn create_work_log(
    State(state): State<ServerState>,
    Json(payload): Json<LaborEntryNew>,
) -> Result<(StatusCode, Json<LaborEntry>), ServerError> {
    let entry = state.engine.new_work_log(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_work_log(
    State(state): State<ServerState>,
    Path(log_id): Path<Uuid>,
) -> Result<Json<LaborEntry>, ServerError> {
    Ok(Json(state.engine.work_log(log_id).await?))
}

pub async fn update_work_log(
    State(state): State<ServerState>,
    Path(log_id): Path<Uuid>,
    Json(payload): Json<LaborEntryUpdate>,
) -> Result<Json<LaborEntry>, ServerError> {
    Ok(Json(state.engine.update_work_log(log_id, payload).await?))
}

pub async fn delete_work_log(
    State(state): State<ServerState>,
    Path(log_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_work_log(log_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
