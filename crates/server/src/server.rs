use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use chrono::NaiveDate;

use std::sync::Arc;

use crate::{analytics, crops, financial, labor, livestock};
use api_types::{HealthStatus, ServiceIndex};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Date used as "today" by windowed analytics.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn index(State(state): State<ServerState>) -> Json<ServiceIndex> {
    Json(ServiceIndex {
        message: "Farm record keeping API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        farm_name: state.engine.farm_name().to_string(),
    })
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}

fn crop_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(crops::list).post(crops::create))
        .route(
            "/cycles",
            get(crops::list_cycles).post(crops::create_cycle),
        )
        .route(
            "/cycles/{id}",
            get(crops::get_cycle)
                .put(crops::update_cycle)
                .delete(crops::delete_cycle),
        )
        .route(
            "/{id}",
            get(crops::get).put(crops::update).delete(crops::delete),
        )
}

fn livestock_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(livestock::list).post(livestock::create))
        .route(
            "/health-records",
            get(livestock::list_health_records).post(livestock::create_health_record),
        )
        .route(
            "/health-records/{id}",
            get(livestock::get_health_record)
                .put(livestock::update_health_record)
                .delete(livestock::delete_health_record),
        )
        .route(
            "/{id}",
            get(livestock::get)
                .put(livestock::update)
                .delete(livestock::delete),
        )
        .route("/{id}/health-records", get(livestock::animal_health_records))
}

fn financial_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/budgets",
            get(financial::list_budgets).post(financial::create_budget),
        )
        .route(
            "/budgets/{id}",
            get(financial::get_budget)
                .put(financial::update_budget)
                .delete(financial::delete_budget),
        )
        .route(
            "/transactions",
            get(financial::list_transactions).post(financial::create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(financial::get_transaction)
                .put(financial::update_transaction)
                .delete(financial::delete_transaction),
        )
}

fn labor_routes() -> Router<ServerState> {
    Router::new()
        .route("/workers", get(labor::list_workers).post(labor::create_worker))
        .route(
            "/workers/{id}",
            get(labor::get_worker)
                .put(labor::update_worker)
                .delete(labor::delete_worker),
        )
        .route("/workers/{id}/work-logs", get(labor::worker_work_logs))
        .route(
            "/work-logs",
            get(labor::list_work_logs).post(labor::create_work_log),
        )
        .route(
            "/work-logs/{id}",
            get(labor::get_work_log)
                .put(labor::update_work_log)
                .delete(labor::delete_work_log),
        )
}

fn analytics_routes() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(analytics::dashboard))
        .route("/financial-summary", get(analytics::financial_summary))
        .route("/budget-summary", get(analytics::budget_summary))
        .route("/crop-summary", get(analytics::crop_summary))
        .route("/crop-performance", get(analytics::crop_performance))
        .route("/livestock-summary", get(analytics::livestock_summary))
        .route("/livestock-health", get(analytics::livestock_health))
        .route("/labor-statistics", get(analytics::labor_statistics))
        .route("/profitability", get(analytics::profitability))
        .route(
            "/resource-utilization",
            get(analytics::resource_utilization),
        )
        .route("/report", get(analytics::report))
}

/// The full API router over `engine`.
pub fn app(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api/crops", crop_routes())
        .nest("/api/livestock", livestock_routes())
        .nest("/api/financial", financial_routes())
        .nest("/api/labor", labor_routes())
        .nest("/api/analytics", analytics_routes())
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:8000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
