use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{
    Budget, BudgetNew, BudgetUpdate, EngineError, EntryKind, FinancialEntry, FinancialEntryNew,
    FinancialEntryUpdate, MoneyCents, ResultEngine, budgets, transactions,
};

use super::{Engine, with_tx};

/// Filters for listing ledger entries.
///
/// `from` and `to` are both inclusive.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub kind: Option<EntryKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn validate_filter(filter: &TransactionFilter) -> ResultEngine<()> {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(EngineError::InvalidDate(
            "invalid range: start_date must not be after end_date".to_string(),
        ));
    }
    Ok(())
}

impl Engine {
    pub async fn new_budget(&self, input: BudgetNew) -> ResultEngine<Budget> {
        let budget = Budget::new(input)?;
        budgets::ActiveModel::from(&budget)
            .insert(&self.database)
            .await?;
        Ok(budget)
    }

    pub async fn budget(&self, budget_id: Uuid) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let model = self.require_budget(&db_tx, budget_id).await?;
            Ok(Budget::from(model))
        })
    }

    /// Budgets of `fiscal_year` (all years when `None`), by category.
    pub async fn list_budgets(&self, fiscal_year: Option<i32>) -> ResultEngine<Vec<Budget>> {
        with_tx!(self, |db_tx| self.budgets_in(&db_tx, fiscal_year).await)
    }

    pub async fn update_budget(&self, budget_id: Uuid, update: BudgetUpdate) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let mut budget = Budget::from(self.require_budget(&db_tx, budget_id).await?);
            budget.apply(update)?;
            budgets::ActiveModel::from(&budget).update(&db_tx).await?;
            Ok(budget)
        })
    }

    /// Deletes a budget. Linked entries stay in the ledger, unlinked.
    pub async fn delete_budget(&self, budget_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_budget(&db_tx, budget_id).await?;
            transactions::Entity::update_many()
                .col_expr(transactions::Column::BudgetId, Expr::value(Option::<Uuid>::None))
                .filter(transactions::Column::BudgetId.eq(budget_id))
                .exec(&db_tx)
                .await?;
            budgets::Entity::delete_by_id(budget_id).exec(&db_tx).await?;
            Ok(())
        })
    }

    /// Records a ledger entry.
    ///
    /// An expense linked to a budget is added to the budget's actual amount.
    pub async fn new_transaction(&self, input: FinancialEntryNew) -> ResultEngine<FinancialEntry> {
        let entry = FinancialEntry::new(input)?;
        with_tx!(self, |db_tx| {
            if let Some(budget_id) = entry.budget_id {
                self.require_budget(&db_tx, budget_id).await?;
            }
            transactions::ActiveModel::from(&entry)
                .insert(&db_tx)
                .await?;
            self.charge_budget(&db_tx, &entry, Direction::Add).await?;
            Ok(entry)
        })
    }

    pub async fn transaction(&self, transaction_id: Uuid) -> ResultEngine<FinancialEntry> {
        with_tx!(self, |db_tx| {
            let model = self.require_transaction(&db_tx, transaction_id).await?;
            FinancialEntry::try_from(model)
        })
    }

    /// Entries matching `filter`, newest first.
    pub async fn list_financial_entries(
        &self,
        filter: &TransactionFilter,
    ) -> ResultEngine<Vec<FinancialEntry>> {
        validate_filter(filter)?;
        with_tx!(self, |db_tx| self.transactions_in(&db_tx, filter).await)
    }

    /// Updates an entry, moving its contribution on the linked budget along.
    pub async fn update_transaction(
        &self,
        transaction_id: Uuid,
        update: FinancialEntryUpdate,
    ) -> ResultEngine<FinancialEntry> {
        with_tx!(self, |db_tx| {
            let model = self.require_transaction(&db_tx, transaction_id).await?;
            let mut entry = FinancialEntry::try_from(model)?;
            self.charge_budget(&db_tx, &entry, Direction::Remove).await?;
            entry.apply(update)?;
            transactions::ActiveModel::from(&entry)
                .update(&db_tx)
                .await?;
            self.charge_budget(&db_tx, &entry, Direction::Add).await?;
            Ok(entry)
        })
    }

    /// Deletes an entry and takes it back out of its budget.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_transaction(&db_tx, transaction_id).await?;
            let entry = FinancialEntry::try_from(model)?;
            self.charge_budget(&db_tx, &entry, Direction::Remove).await?;
            transactions::Entity::delete_by_id(transaction_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    pub(super) async fn budgets_in(
        &self,
        db_tx: &DatabaseTransaction,
        fiscal_year: Option<i32>,
    ) -> ResultEngine<Vec<Budget>> {
        let mut query = budgets::Entity::find();
        if let Some(year) = fiscal_year {
            query = query.filter(budgets::Column::FiscalYear.eq(year));
        }
        let models = query
            .order_by_asc(budgets::Column::Category)
            .order_by_asc(budgets::Column::Name)
            .all(db_tx)
            .await?;
        Ok(models.into_iter().map(Budget::from).collect())
    }

    pub(super) async fn transactions_in(
        &self,
        db_tx: &DatabaseTransaction,
        filter: &TransactionFilter,
    ) -> ResultEngine<Vec<FinancialEntry>> {
        let mut query = transactions::Entity::find();
        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(transactions::Column::Category.eq(category.trim()));
        }
        if let Some(from) = filter.from {
            query = query.filter(transactions::Column::TransactionDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(transactions::Column::TransactionDate.lte(to));
        }
        query
            .order_by_desc(transactions::Column::TransactionDate)
            .all(db_tx)
            .await?
            .into_iter()
            .map(FinancialEntry::try_from)
            .collect()
    }

    async fn require_budget(
        &self,
        db_tx: &DatabaseTransaction,
        budget_id: Uuid,
    ) -> ResultEngine<budgets::Model> {
        budgets::Entity::find_by_id(budget_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))
    }

    async fn require_transaction(
        &self,
        db_tx: &DatabaseTransaction,
        transaction_id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(transaction_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))
    }

    /// Applies the entry's contribution to its budget, if any.
    ///
    /// A budget deleted in the meantime is ignored; `actual_amount` never
    /// drops below zero.
    async fn charge_budget(
        &self,
        db_tx: &DatabaseTransaction,
        entry: &FinancialEntry,
        direction: Direction,
    ) -> ResultEngine<()> {
        let Some((budget_id, amount)) = entry.budget_contribution() else {
            return Ok(());
        };
        let Some(model) = budgets::Entity::find_by_id(budget_id).one(db_tx).await? else {
            return Ok(());
        };

        let current = MoneyCents::new(model.actual_minor);
        let actual = match direction {
            Direction::Add => current.checked_add(amount),
            Direction::Remove => current.checked_sub(amount),
        }
        .ok_or_else(|| EngineError::InvalidAmount("budget actual amount overflow".to_string()))?;
        let actual = actual.max(MoneyCents::ZERO);

        tracing::debug!(%budget_id, %actual, "budget actual amount updated");
        let active = budgets::ActiveModel {
            id: ActiveValue::Set(budget_id),
            actual_minor: ActiveValue::Set(actual.cents()),
            ..Default::default()
        };
        active.update(db_tx).await?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Add,
    Remove,
}
