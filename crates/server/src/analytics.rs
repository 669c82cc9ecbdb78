//! Read-only analytics endpoints.
//!
//! Every handler uses the local calendar date as "today" for the windowed
//! summaries (livestock health, default labor window, dashboard).

use api_types::analytics::{DateRangeQuery, FiscalYearQuery, ReportQuery};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Datelike;
use engine::{
    BudgetSummary, CropPerformance, CropSummary, Dashboard, DateWindow, EngineError, FarmReport,
    FinancialSummary, HealthSummary, LaborStatistics, LivestockSummary, ProfitabilityAnalysis,
    ReportKind, ResourceUtilization, analytics::LABOR_WINDOW_DAYS,
};

use crate::{
    ServerError,
    server::{ServerState, today},
};

pub async fn dashboard(State(state): State<ServerState>) -> Result<Json<Dashboard>, ServerError> {
    Ok(Json(state.engine.dashboard(today()).await?))
}

pub async fn financial_summary(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<FinancialSummary>, ServerError> {
    Ok(Json(
        state
            .engine
            .financial_summary(query.start_date, query.end_date)
            .await?,
    ))
}

pub async fn budget_summary(
    State(state): State<ServerState>,
    Query(query): Query<FiscalYearQuery>,
) -> Result<Json<BudgetSummary>, ServerError> {
    let fiscal_year = query.fiscal_year.unwrap_or_else(|| today().year());
    Ok(Json(state.engine.budget_summary(fiscal_year).await?))
}

pub async fn crop_summary(
    State(state): State<ServerState>,
) -> Result<Json<CropSummary>, ServerError> {
    Ok(Json(state.engine.crop_summary().await?))
}

pub async fn crop_performance(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CropPerformance>>, ServerError> {
    Ok(Json(state.engine.crop_performance().await?))
}

pub async fn livestock_summary(
    State(state): State<ServerState>,
) -> Result<Json<LivestockSummary>, ServerError> {
    Ok(Json(state.engine.livestock_summary().await?))
}

pub async fn livestock_health(
    State(state): State<ServerState>,
) -> Result<Json<HealthSummary>, ServerError> {
    Ok(Json(state.engine.livestock_health(today()).await?))
}

/// Labor over `[start_date, end_date]`; a missing start means 30 days before
/// today, a missing end means today.
pub async fn labor_statistics(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<LaborStatistics>, ServerError> {
    let today = today();
    let default = DateWindow::last_days(today, LABOR_WINDOW_DAYS);
    let start = query.start_date.unwrap_or(default.start);
    let end = query.end_date.unwrap_or(default.end);
    if start > end {
        return Err(EngineError::InvalidDate(
            "invalid range: start_date must not be after end_date".to_string(),
        )
        .into());
    }
    let window = DateWindow::new(start, end);
    Ok(Json(
        state.engine.labor_statistics(Some(window), today).await?,
    ))
}

pub async fn profitability(
    State(state): State<ServerState>,
) -> Result<Json<ProfitabilityAnalysis>, ServerError> {
    Ok(Json(state.engine.profitability().await?))
}

pub async fn resource_utilization(
    State(state): State<ServerState>,
) -> Result<Json<ResourceUtilization>, ServerError> {
    Ok(Json(state.engine.resource_utilization().await?))
}

pub async fn report(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<FarmReport>, ServerError> {
    let kind = query
        .kind
        .unwrap_or_else(|| ReportKind::Comprehensive.as_str().to_string());
    Ok(Json(state.engine.report(kind.trim(), today()).await?))
}
