//! Veterinary history: vaccinations, checkups, treatments.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    MoneyCents, ResultEngine,
    util::{normalize_optional_text, normalize_required_name, require_non_negative},
};

const VACCINATION: &str = "vaccination";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub livestock_id: Uuid,
    pub record_date: NaiveDate,
    /// Free-form: `vaccination`, `checkup`, `treatment`, `illness`, ...
    pub record_type: String,
    pub description: String,
    pub treatment: Option<String>,
    pub veterinarian: Option<String>,
    pub cost: Option<MoneyCents>,
    pub next_followup_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl HealthRecord {
    pub fn is_vaccination(&self) -> bool {
        self.record_type.eq_ignore_ascii_case(VACCINATION)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct HealthRecordNew {
    pub livestock_id: Uuid,
    pub record_date: NaiveDate,
    pub record_type: String,
    pub description: String,
    pub treatment: Option<String>,
    pub veterinarian: Option<String>,
    pub cost: Option<MoneyCents>,
    pub next_followup_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HealthRecordUpdate {
    pub record_date: Option<NaiveDate>,
    pub record_type: Option<String>,
    pub description: Option<String>,
    pub treatment: Option<String>,
    pub veterinarian: Option<String>,
    pub cost: Option<MoneyCents>,
    pub next_followup_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl HealthRecord {
    pub(crate) fn new(input: HealthRecordNew) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            livestock_id: input.livestock_id,
            record_date: input.record_date,
            record_type: normalize_required_name(&input.record_type, "record type")?,
            description: normalize_required_name(&input.description, "description")?,
            treatment: normalize_optional_text(input.treatment.as_deref()),
            veterinarian: normalize_optional_text(input.veterinarian.as_deref()),
            cost: input
                .cost
                .map(|cost| require_non_negative(cost, "cost"))
                .transpose()?,
            next_followup_date: input.next_followup_date,
            notes: normalize_optional_text(input.notes.as_deref()),
        })
    }

    pub(crate) fn apply(&mut self, update: HealthRecordUpdate) -> ResultEngine<()> {
        if let Some(date) = update.record_date {
            self.record_date = date;
        }
        if let Some(kind) = update.record_type {
            self.record_type = normalize_required_name(&kind, "record type")?;
        }
        if let Some(description) = update.description {
            self.description = normalize_required_name(&description, "description")?;
        }
        if update.treatment.is_some() {
            self.treatment = normalize_optional_text(update.treatment.as_deref());
        }
        if update.veterinarian.is_some() {
            self.veterinarian = normalize_optional_text(update.veterinarian.as_deref());
        }
        if let Some(cost) = update.cost {
            self.cost = Some(require_non_negative(cost, "cost")?);
        }
        if update.next_followup_date.is_some() {
            self.next_followup_date = update.next_followup_date;
        }
        if update.notes.is_some() {
            self.notes = normalize_optional_text(update.notes.as_deref());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "health_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub livestock_id: Uuid,
    pub record_date: Date,
    pub record_type: String,
    pub description: String,
    pub treatment: Option<String>,
    pub veterinarian: Option<String>,
    pub cost_minor: Option<i64>,
    pub next_followup_date: Option<Date>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::livestock::Entity",
        from = "Column::LivestockId",
        to = "super::livestock::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Livestock,
}

impl Related<super::livestock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Livestock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for HealthRecord {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            livestock_id: value.livestock_id,
            record_date: value.record_date,
            record_type: value.record_type,
            description: value.description,
            treatment: value.treatment,
            veterinarian: value.veterinarian,
            cost: value.cost_minor.map(MoneyCents::new),
            next_followup_date: value.next_followup_date,
            notes: value.notes,
        }
    }
}

impl From<&HealthRecord> for ActiveModel {
    fn from(value: &HealthRecord) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            livestock_id: ActiveValue::Set(value.livestock_id),
            record_date: ActiveValue::Set(value.record_date),
            record_type: ActiveValue::Set(value.record_type.clone()),
            description: ActiveValue::Set(value.description.clone()),
            treatment: ActiveValue::Set(value.treatment.clone()),
            veterinarian: ActiveValue::Set(value.veterinarian.clone()),
            cost_minor: ActiveValue::Set(value.cost.map(MoneyCents::cents)),
            next_followup_date: ActiveValue::Set(value.next_followup_date),
            notes: ActiveValue::Set(value.notes.clone()),
        }
    }
}
