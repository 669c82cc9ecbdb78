//! Crop cycles: one planting of a crop on a field, from planning to harvest.
//!
//! Areas are always hectares. Expenses and revenue are tracked per cycle so
//! crop profit can be reported without joining the ledger.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine,
    util::{normalize_optional_text, require_non_negative, require_quantity},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    #[default]
    Planned,
    Planted,
    Growing,
    Harvested,
    Failed,
}

impl CycleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Planted => "planted",
            Self::Growing => "growing",
            Self::Harvested => "harvested",
            Self::Failed => "failed",
        }
    }
}

impl TryFrom<&str> for CycleStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "planned" => Ok(Self::Planned),
            "planted" => Ok(Self::Planted),
            "growing" => Ok(Self::Growing),
            "harvested" => Ok(Self::Harvested),
            "failed" => Ok(Self::Failed),
            other => Err(EngineError::InvalidKind(format!(
                "invalid crop cycle status: {other}"
            ))),
        }
    }
}

/// A crop cycle joined with the name of its crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropCycle {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub crop_name: String,
    pub field_location: Option<String>,
    pub area_hectares: f64,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub actual_harvest_date: Option<NaiveDate>,
    pub status: CycleStatus,
    pub yield_amount: Option<f64>,
    pub yield_unit: Option<String>,
    pub expenses: MoneyCents,
    pub revenue: MoneyCents,
    pub notes: Option<String>,
}

impl CropCycle {
    /// Only harvested cycles with a recorded yield count towards performance.
    pub fn is_harvested_with_yield(&self) -> bool {
        self.status == CycleStatus::Harvested && self.yield_amount.is_some()
    }

    /// `yield_amount / area_hectares`, when both are known and the area is
    /// positive.
    pub fn yield_per_area(&self) -> Option<f64> {
        let amount = self.yield_amount?;
        (self.area_hectares > 0.0).then(|| amount / self.area_hectares)
    }

    pub fn profit(&self) -> MoneyCents {
        self.revenue - self.expenses
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CropCycleNew {
    pub crop_id: Uuid,
    pub field_location: Option<String>,
    pub area_hectares: Option<f64>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub status: Option<CycleStatus>,
    pub expenses: Option<MoneyCents>,
    pub revenue: Option<MoneyCents>,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CropCycleUpdate {
    pub field_location: Option<String>,
    pub area_hectares: Option<f64>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub actual_harvest_date: Option<NaiveDate>,
    pub status: Option<CycleStatus>,
    pub yield_amount: Option<f64>,
    pub yield_unit: Option<String>,
    pub expenses: Option<MoneyCents>,
    pub revenue: Option<MoneyCents>,
    pub notes: Option<String>,
}

impl CropCycle {
    pub(crate) fn new(input: CropCycleNew, crop_name: String) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            crop_id: input.crop_id,
            crop_name,
            field_location: normalize_optional_text(input.field_location.as_deref()),
            area_hectares: require_quantity(input.area_hectares.unwrap_or(0.0), "area_hectares")?,
            planting_date: input.planting_date,
            expected_harvest_date: input.expected_harvest_date,
            actual_harvest_date: None,
            status: input.status.unwrap_or_default(),
            yield_amount: None,
            yield_unit: None,
            expenses: require_non_negative(input.expenses.unwrap_or_default(), "expenses")?,
            revenue: require_non_negative(input.revenue.unwrap_or_default(), "revenue")?,
            notes: normalize_optional_text(input.notes.as_deref()),
        })
    }

    pub(crate) fn apply(&mut self, update: CropCycleUpdate) -> ResultEngine<()> {
        if update.field_location.is_some() {
            self.field_location = normalize_optional_text(update.field_location.as_deref());
        }
        if let Some(area) = update.area_hectares {
            self.area_hectares = require_quantity(area, "area_hectares")?;
        }
        if update.planting_date.is_some() {
            self.planting_date = update.planting_date;
        }
        if update.expected_harvest_date.is_some() {
            self.expected_harvest_date = update.expected_harvest_date;
        }
        if update.actual_harvest_date.is_some() {
            self.actual_harvest_date = update.actual_harvest_date;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(amount) = update.yield_amount {
            self.yield_amount = Some(require_quantity(amount, "yield_amount")?);
        }
        if update.yield_unit.is_some() {
            self.yield_unit = normalize_optional_text(update.yield_unit.as_deref());
        }
        if let Some(expenses) = update.expenses {
            self.expenses = require_non_negative(expenses, "expenses")?;
        }
        if let Some(revenue) = update.revenue {
            self.revenue = require_non_negative(revenue, "revenue")?;
        }
        if update.notes.is_some() {
            self.notes = normalize_optional_text(update.notes.as_deref());
        }
        Ok(())
    }

    pub(crate) fn from_model(model: Model, crop_name: String) -> ResultEngine<Self> {
        Ok(Self {
            id: model.id,
            crop_id: model.crop_id,
            crop_name,
            field_location: model.field_location,
            area_hectares: model.area_hectares,
            planting_date: model.planting_date,
            expected_harvest_date: model.expected_harvest_date,
            actual_harvest_date: model.actual_harvest_date,
            status: CycleStatus::try_from(model.status.as_str())?,
            yield_amount: model.yield_amount,
            yield_unit: model.yield_unit,
            expenses: MoneyCents::new(model.expenses_minor),
            revenue: MoneyCents::new(model.revenue_minor),
            notes: model.notes,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crop_cycles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub crop_id: Uuid,
    pub field_location: Option<String>,
    pub area_hectares: f64,
    pub planting_date: Option<Date>,
    pub expected_harvest_date: Option<Date>,
    pub actual_harvest_date: Option<Date>,
    pub status: String,
    pub yield_amount: Option<f64>,
    pub yield_unit: Option<String>,
    pub expenses_minor: i64,
    pub revenue_minor: i64,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::crops::Entity",
        from = "Column::CropId",
        to = "super::crops::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Crop,
}

impl Related<super::crops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CropCycle> for ActiveModel {
    fn from(value: &CropCycle) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            crop_id: ActiveValue::Set(value.crop_id),
            field_location: ActiveValue::Set(value.field_location.clone()),
            area_hectares: ActiveValue::Set(value.area_hectares),
            planting_date: ActiveValue::Set(value.planting_date),
            expected_harvest_date: ActiveValue::Set(value.expected_harvest_date),
            actual_harvest_date: ActiveValue::Set(value.actual_harvest_date),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            yield_amount: ActiveValue::Set(value.yield_amount),
            yield_unit: ActiveValue::Set(value.yield_unit.clone()),
            expenses_minor: ActiveValue::Set(value.expenses.cents()),
            revenue_minor: ActiveValue::Set(value.revenue.cents()),
            notes: ActiveValue::Set(value.notes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> CropCycle {
        CropCycle::new(
            CropCycleNew {
                crop_id: Uuid::new_v4(),
                area_hectares: Some(10.0),
                ..Default::default()
            },
            "Wheat".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn new_cycle_is_planned_without_yield() {
        let cycle = cycle();
        assert_eq!(cycle.status, CycleStatus::Planned);
        assert!(!cycle.is_harvested_with_yield());
        assert_eq!(cycle.yield_per_area(), None);
    }

    #[test]
    fn harvest_update_enables_yield_per_area() {
        let mut cycle = cycle();
        cycle
            .apply(CropCycleUpdate {
                status: Some(CycleStatus::Harvested),
                yield_amount: Some(500.0),
                ..Default::default()
            })
            .unwrap();
        assert!(cycle.is_harvested_with_yield());
        assert_eq!(cycle.yield_per_area(), Some(50.0));
    }

    #[test]
    fn zero_area_has_no_yield_per_area() {
        let mut cycle = cycle();
        cycle.area_hectares = 0.0;
        cycle.yield_amount = Some(10.0);
        assert_eq!(cycle.yield_per_area(), None);
    }

    #[test]
    fn negative_area_is_rejected() {
        let mut cycle = cycle();
        let err = cycle
            .apply(CropCycleUpdate {
                area_hectares: Some(-2.0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn status_round_trips_through_storage_string() {
        for status in [
            CycleStatus::Planned,
            CycleStatus::Planted,
            CycleStatus::Growing,
            CycleStatus::Harvested,
            CycleStatus::Failed,
        ] {
            assert_eq!(CycleStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert!(CycleStatus::try_from("ripe").is_err());
    }
}
