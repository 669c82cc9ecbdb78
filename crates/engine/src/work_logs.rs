//! Work logs: hours a worker spent on an activity on a given day.
//!
//! [`LaborEntry`] is the log joined with its worker, so labor cost can be
//! computed without another lookup.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    MoneyCents, ResultEngine, Worker,
    util::{normalize_optional_text, require_quantity},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaborEntry {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub worker_name: String,
    /// Rate of the worker at read time; `None` when the worker has none.
    pub hourly_rate: Option<MoneyCents>,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    /// planting, harvesting, feeding, maintenance, ...
    pub activity_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl LaborEntry {
    /// `hours_worked × hourly_rate`, rounded to the cent; zero without a rate.
    pub fn total_cost(&self) -> MoneyCents {
        MoneyCents::round_cents(self.cost_in_cents())
    }

    /// Unrounded `hours_worked × hourly_rate` in cents, for summing many entries.
    pub fn cost_in_cents(&self) -> f64 {
        self.hourly_rate
            .map(|rate| rate.cents() as f64 * self.hours_worked)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LaborEntryNew {
    pub worker_id: Uuid,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub activity_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LaborEntryUpdate {
    pub work_date: Option<NaiveDate>,
    pub hours_worked: Option<f64>,
    pub activity_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl LaborEntry {
    pub(crate) fn new(input: LaborEntryNew, worker: &Worker) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            worker_id: worker.id,
            worker_name: worker.full_name(),
            hourly_rate: worker.hourly_rate,
            work_date: input.work_date,
            hours_worked: require_quantity(input.hours_worked, "hours_worked")?,
            activity_type: normalize_optional_text(input.activity_type.as_deref()),
            location: normalize_optional_text(input.location.as_deref()),
            description: normalize_optional_text(input.description.as_deref()),
            notes: normalize_optional_text(input.notes.as_deref()),
        })
    }

    pub(crate) fn apply(&mut self, update: LaborEntryUpdate) -> ResultEngine<()> {
        if let Some(date) = update.work_date {
            self.work_date = date;
        }
        if let Some(hours) = update.hours_worked {
            self.hours_worked = require_quantity(hours, "hours_worked")?;
        }
        if update.activity_type.is_some() {
            self.activity_type = normalize_optional_text(update.activity_type.as_deref());
        }
        if update.location.is_some() {
            self.location = normalize_optional_text(update.location.as_deref());
        }
        if update.description.is_some() {
            self.description = normalize_optional_text(update.description.as_deref());
        }
        if update.notes.is_some() {
            self.notes = normalize_optional_text(update.notes.as_deref());
        }
        Ok(())
    }

    pub(crate) fn from_model(model: Model, worker: &Worker) -> Self {
        Self {
            id: model.id,
            worker_id: model.worker_id,
            worker_name: worker.full_name(),
            hourly_rate: worker.hourly_rate,
            work_date: model.work_date,
            hours_worked: model.hours_worked,
            activity_type: model.activity_type,
            location: model.location,
            description: model.description,
            notes: model.notes,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub worker_id: Uuid,
    pub work_date: Date,
    pub hours_worked: f64,
    pub activity_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workers::Entity",
        from = "Column::WorkerId",
        to = "super::workers::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Worker,
}

impl Related<super::workers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Worker.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&LaborEntry> for ActiveModel {
    fn from(value: &LaborEntry) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            worker_id: ActiveValue::Set(value.worker_id),
            work_date: ActiveValue::Set(value.work_date),
            hours_worked: ActiveValue::Set(value.hours_worked),
            activity_type: ActiveValue::Set(value.activity_type.clone()),
            location: ActiveValue::Set(value.location.clone()),
            description: ActiveValue::Set(value.description.clone()),
            notes: ActiveValue::Set(value.notes.clone()),
        }
    }
}
