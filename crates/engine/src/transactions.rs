//! Ledger entries: money in (`income`) or out (`expense`).
//!
//! Amounts are always non-negative; the direction is carried by
//! [`EntryKind`].

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine,
    util::{normalize_optional_text, normalize_required_name, require_non_negative},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub category: String,
    pub amount: MoneyCents,
    pub description: String,
    pub budget_id: Option<Uuid>,
    /// `cash`, `check`, `card`, `transfer`.
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl FinancialEntry {
    /// How much this entry adds to its budget's actual spending.
    ///
    /// Only expenses count; income never reduces a budget.
    pub(crate) fn budget_contribution(&self) -> Option<(Uuid, MoneyCents)> {
        match (self.kind, self.budget_id) {
            (EntryKind::Expense, Some(budget_id)) => Some((budget_id, self.amount)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FinancialEntryNew {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub category: String,
    pub amount: MoneyCents,
    pub description: String,
    pub budget_id: Option<Uuid>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FinancialEntryUpdate {
    pub date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub category: Option<String>,
    pub amount: Option<MoneyCents>,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl FinancialEntry {
    pub(crate) fn new(input: FinancialEntryNew) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            date: input.date,
            kind: input.kind,
            category: normalize_required_name(&input.category, "category")?,
            amount: require_non_negative(input.amount, "amount")?,
            description: normalize_required_name(&input.description, "description")?,
            budget_id: input.budget_id,
            payment_method: normalize_optional_text(input.payment_method.as_deref()),
            reference_number: normalize_optional_text(input.reference_number.as_deref()),
            notes: normalize_optional_text(input.notes.as_deref()),
        })
    }

    pub(crate) fn apply(&mut self, update: FinancialEntryUpdate) -> ResultEngine<()> {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(category) = update.category {
            self.category = normalize_required_name(&category, "category")?;
        }
        if let Some(amount) = update.amount {
            self.amount = require_non_negative(amount, "amount")?;
        }
        if let Some(description) = update.description {
            self.description = normalize_required_name(&description, "description")?;
        }
        if update.payment_method.is_some() {
            self.payment_method = normalize_optional_text(update.payment_method.as_deref());
        }
        if update.reference_number.is_some() {
            self.reference_number = normalize_optional_text(update.reference_number.as_deref());
        }
        if update.notes.is_some() {
            self.notes = normalize_optional_text(update.notes.as_deref());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub transaction_date: Date,
    pub kind: String,
    pub category: String,
    pub amount_minor: i64,
    pub description: String,
    pub budget_id: Option<Uuid>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Budget,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budget.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for FinancialEntry {
    type Error = EngineError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            date: value.transaction_date,
            kind: EntryKind::try_from(value.kind.as_str())?,
            category: value.category,
            amount: MoneyCents::new(value.amount_minor),
            description: value.description,
            budget_id: value.budget_id,
            payment_method: value.payment_method,
            reference_number: value.reference_number,
            notes: value.notes,
        })
    }
}

impl From<&FinancialEntry> for ActiveModel {
    fn from(value: &FinancialEntry) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            transaction_date: ActiveValue::Set(value.date),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            category: ActiveValue::Set(value.category.clone()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            description: ActiveValue::Set(value.description.clone()),
            budget_id: ActiveValue::Set(value.budget_id),
            payment_method: ActiveValue::Set(value.payment_method.clone()),
            reference_number: ActiveValue::Set(value.reference_number.clone()),
            notes: ActiveValue::Set(value.notes.clone()),
        }
    }
}
