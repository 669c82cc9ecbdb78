//! Budgets: planned spending per category and fiscal year.
//!
//! `actual_amount` is not entered by hand on creation: it accumulates the
//! expense transactions linked to the budget.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine,
    util::{normalize_optional_text, normalize_required_name, require_non_negative},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    /// `crop`, `livestock`, `equipment`, `labor`, `other`, or anything else.
    pub category: String,
    pub fiscal_year: i32,
    pub planned_amount: MoneyCents,
    pub actual_amount: MoneyCents,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl Budget {
    /// `actual - planned`.
    pub fn variance(&self) -> MoneyCents {
        self.actual_amount - self.planned_amount
    }

    /// Variance as a percentage of the planned amount, `0.0` when nothing was
    /// planned.
    pub fn variance_percentage(&self) -> f64 {
        self.variance().percent_of(self.planned_amount)
    }
}

/// Budget with its derived variance, as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetView {
    #[serde(flatten)]
    pub budget: Budget,
    pub variance: MoneyCents,
    pub variance_percentage: f64,
}

impl From<Budget> for BudgetView {
    fn from(budget: Budget) -> Self {
        Self {
            variance: budget.variance(),
            variance_percentage: budget.variance_percentage(),
            budget,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BudgetNew {
    pub name: String,
    pub category: String,
    pub fiscal_year: i32,
    pub planned_amount: MoneyCents,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BudgetUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub planned_amount: Option<MoneyCents>,
    pub actual_amount: Option<MoneyCents>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ResultEngine<()> {
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(EngineError::InvalidDate(
            "start_date must not be after end_date".to_string(),
        ));
    }
    Ok(())
}

impl Budget {
    pub(crate) fn new(input: BudgetNew) -> ResultEngine<Self> {
        validate_range(input.start_date, input.end_date)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(&input.name, "budget name")?,
            category: normalize_required_name(&input.category, "category")?,
            fiscal_year: input.fiscal_year,
            planned_amount: require_non_negative(input.planned_amount, "planned_amount")?,
            actual_amount: MoneyCents::ZERO,
            start_date: input.start_date,
            end_date: input.end_date,
            description: normalize_optional_text(input.description.as_deref()),
        })
    }

    pub(crate) fn apply(&mut self, update: BudgetUpdate) -> ResultEngine<()> {
        if let Some(name) = update.name {
            self.name = normalize_required_name(&name, "budget name")?;
        }
        if let Some(category) = update.category {
            self.category = normalize_required_name(&category, "category")?;
        }
        if let Some(planned) = update.planned_amount {
            self.planned_amount = require_non_negative(planned, "planned_amount")?;
        }
        if let Some(actual) = update.actual_amount {
            self.actual_amount = require_non_negative(actual, "actual_amount")?;
        }
        if update.start_date.is_some() {
            self.start_date = update.start_date;
        }
        if update.end_date.is_some() {
            self.end_date = update.end_date;
        }
        if update.description.is_some() {
            self.description = normalize_optional_text(update.description.as_deref());
        }
        validate_range(self.start_date, self.end_date)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub fiscal_year: i32,
    pub planned_minor: i64,
    pub actual_minor: i64,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Budget {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            fiscal_year: value.fiscal_year,
            planned_amount: MoneyCents::new(value.planned_minor),
            actual_amount: MoneyCents::new(value.actual_minor),
            start_date: value.start_date,
            end_date: value.end_date,
            description: value.description,
        }
    }
}

impl From<&Budget> for ActiveModel {
    fn from(value: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            name: ActiveValue::Set(value.name.clone()),
            category: ActiveValue::Set(value.category.clone()),
            fiscal_year: ActiveValue::Set(value.fiscal_year),
            planned_minor: ActiveValue::Set(value.planned_amount.cents()),
            actual_minor: ActiveValue::Set(value.actual_amount.cents()),
            start_date: ActiveValue::Set(value.start_date),
            end_date: ActiveValue::Set(value.end_date),
            description: ActiveValue::Set(value.description.clone()),
        }
    }
}
