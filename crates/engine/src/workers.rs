//! Farm workers and their pay rate.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine,
    util::{normalize_optional_text, normalize_required_name, require_non_negative},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    #[default]
    Active,
    Inactive,
    Terminated,
}

impl WorkerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Terminated => "terminated",
        }
    }
}

impl TryFrom<&str> for WorkerStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "terminated" => Ok(Self::Terminated),
            other => Err(EngineError::InvalidKind(format!(
                "invalid worker status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub employee_id: Option<String>,
    /// farm manager, field worker, livestock handler, mechanic, ...
    pub role: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hourly_rate: Option<MoneyCents>,
    pub status: WorkerStatus,
    pub notes: Option<String>,
}

impl Worker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorkerNew {
    pub first_name: String,
    pub last_name: String,
    pub employee_id: Option<String>,
    pub role: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hourly_rate: Option<MoneyCents>,
    pub status: Option<WorkerStatus>,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorkerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hourly_rate: Option<MoneyCents>,
    pub status: Option<WorkerStatus>,
    pub notes: Option<String>,
}

impl Worker {
    pub(crate) fn new(input: WorkerNew) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            first_name: normalize_required_name(&input.first_name, "first name")?,
            last_name: normalize_required_name(&input.last_name, "last name")?,
            employee_id: normalize_optional_text(input.employee_id.as_deref()),
            role: normalize_optional_text(input.role.as_deref()),
            hire_date: input.hire_date,
            phone: normalize_optional_text(input.phone.as_deref()),
            email: normalize_optional_text(input.email.as_deref()),
            hourly_rate: input
                .hourly_rate
                .map(|rate| require_non_negative(rate, "hourly_rate"))
                .transpose()?,
            status: input.status.unwrap_or_default(),
            notes: normalize_optional_text(input.notes.as_deref()),
        })
    }

    pub(crate) fn apply(&mut self, update: WorkerUpdate) -> ResultEngine<()> {
        if let Some(first_name) = update.first_name {
            self.first_name = normalize_required_name(&first_name, "first name")?;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = normalize_required_name(&last_name, "last name")?;
        }
        if update.role.is_some() {
            self.role = normalize_optional_text(update.role.as_deref());
        }
        if update.hire_date.is_some() {
            self.hire_date = update.hire_date;
        }
        if update.phone.is_some() {
            self.phone = normalize_optional_text(update.phone.as_deref());
        }
        if update.email.is_some() {
            self.email = normalize_optional_text(update.email.as_deref());
        }
        if let Some(rate) = update.hourly_rate {
            self.hourly_rate = Some(require_non_negative(rate, "hourly_rate")?);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if update.notes.is_some() {
            self.notes = normalize_optional_text(update.notes.as_deref());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "workers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub employee_id: Option<String>,
    pub role: Option<String>,
    pub hire_date: Option<Date>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hourly_rate_minor: Option<i64>,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_logs::Entity")]
    WorkLogs,
}

impl Related<super::work_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Worker {
    type Error = EngineError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            employee_id: value.employee_id,
            role: value.role,
            hire_date: value.hire_date,
            phone: value.phone,
            email: value.email,
            hourly_rate: value.hourly_rate_minor.map(MoneyCents::new),
            status: WorkerStatus::try_from(value.status.as_str())?,
            notes: value.notes,
        })
    }
}

impl From<&Worker> for ActiveModel {
    fn from(value: &Worker) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            first_name: ActiveValue::Set(value.first_name.clone()),
            last_name: ActiveValue::Set(value.last_name.clone()),
            employee_id: ActiveValue::Set(value.employee_id.clone()),
            role: ActiveValue::Set(value.role.clone()),
            hire_date: ActiveValue::Set(value.hire_date),
            phone: ActiveValue::Set(value.phone.clone()),
            email: ActiveValue::Set(value.email.clone()),
            hourly_rate_minor: ActiveValue::Set(value.hourly_rate.map(MoneyCents::cents)),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            notes: ActiveValue::Set(value.notes.clone()),
        }
    }
}
