//! Crop types grown on the farm.
//!
//! A `Crop` is the catalogue entry ("Wheat", "Maize"); each planting of it is
//! a [`CropCycle`](crate::CropCycle).

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ResultEngine,
    util::{normalize_optional_text, normalize_required_name},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: Uuid,
    pub name: String,
    pub variety: Option<String>,
    pub description: Option<String>,
    pub typical_growth_days: Option<i32>,
}

/// Fields accepted when registering a crop.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CropNew {
    pub name: String,
    pub variety: Option<String>,
    pub description: Option<String>,
    pub typical_growth_days: Option<i32>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CropUpdate {
    pub name: Option<String>,
    pub variety: Option<String>,
    pub description: Option<String>,
    pub typical_growth_days: Option<i32>,
}

impl Crop {
    pub(crate) fn new(input: CropNew) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(&input.name, "crop name")?,
            variety: normalize_optional_text(input.variety.as_deref()),
            description: normalize_optional_text(input.description.as_deref()),
            typical_growth_days: input.typical_growth_days,
        })
    }

    pub(crate) fn apply(&mut self, update: CropUpdate) -> ResultEngine<()> {
        if let Some(name) = update.name {
            self.name = normalize_required_name(&name, "crop name")?;
        }
        if update.variety.is_some() {
            self.variety = normalize_optional_text(update.variety.as_deref());
        }
        if update.description.is_some() {
            self.description = normalize_optional_text(update.description.as_deref());
        }
        if update.typical_growth_days.is_some() {
            self.typical_growth_days = update.typical_growth_days;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub variety: Option<String>,
    pub description: Option<String>,
    pub typical_growth_days: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::crop_cycles::Entity")]
    Cycles,
}

impl Related<super::crop_cycles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cycles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Crop {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            variety: value.variety,
            description: value.description,
            typical_growth_days: value.typical_growth_days,
        }
    }
}

impl From<&Crop> for ActiveModel {
    fn from(value: &Crop) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            name: ActiveValue::Set(value.name.clone()),
            variety: ActiveValue::Set(value.variety.clone()),
            description: ActiveValue::Set(value.description.clone()),
            typical_growth_days: ActiveValue::Set(value.typical_growth_days),
        }
    }
}
