//! Budget and ledger endpoints.
//!
//! Budgets are returned as [`BudgetView`], which carries the variance next to
//! the stored amounts.

use api_types::financial::{BudgetListQuery, TransactionListQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{
    BudgetNew, BudgetUpdate, BudgetView, FinancialEntry, FinancialEntryNew, FinancialEntryUpdate,
    TransactionFilter,
};
use uuid::Uuid;

use crate::{ServerError, parse_optional, server::ServerState};

pub async fn list_budgets(
    State(state): State<ServerState>,
    Query(query): Query<BudgetListQuery>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let budgets = state.engine.list_budgets(query.fiscal_year).await?;
    Ok(Json(budgets.into_iter().map(BudgetView::from).collect()))
}

pub async fn create_budget(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state.engine.new_budget(payload).await?;
    Ok((StatusCode::CREATED, Json(budget.into())))
}

pub async fn get_budget(
    State(state): State<ServerState>,
    Path(budget_id): Path<Uuid>,
) -> Result<Json<BudgetView>, ServerError> {
    Ok(Json(state.engine.budget(budget_id).await?.into()))
}

pub async fn update_budget(
    State(state): State<ServerState>,
    Path(budget_id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<BudgetView>, ServerError> {
    Ok(Json(
        state.engine.update_budget(budget_id, payload).await?.into(),
    ))
}

pub async fn delete_budget(
    State(state): State<ServerState>,
    Path(budget_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_transactions(
    State(state): State<ServerState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<Vec<FinancialEntry>>, ServerError> {
    let filter = TransactionFilter {
        kind: parse_optional(query.kind.as_deref())?,
        category: query
            .category
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty()),
        from: query.start_date,
        to: query.end_date,
    };
    Ok(Json(state.engine.list_financial_entries(&filter).await?))
}

pub async fn create_transaction(
    State(state): State<ServerState>,
    Json(payload): Json<FinancialEntryNew>,
) -> Result<(StatusCode, Json<FinancialEntry>), ServerError> {
    let entry = state.engine.new_transaction(payload).await?;
    tracing::info!(
        transaction_id = %entry.id,
        kind = entry.kind.as_str(),
        amount = %entry.amount,
        "transaction recorded"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_transaction(
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<FinancialEntry>, ServerError> {
    Ok(Json(state.engine.transaction(transaction_id).await?))
}

pub async fn update_transaction(
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<FinancialEntryUpdate>,
) -> Result<Json<FinancialEntry>, ServerError> {
    Ok(Json(
        state
            .engine
            .update_transaction(transaction_id, payload)
            .await?,
    ))
}

pub async fn delete_transaction(
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
