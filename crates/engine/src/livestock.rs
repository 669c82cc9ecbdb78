//! The module contains the `Livestock` struct: one tagged animal.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine,
    util::{normalize_optional_text, normalize_required_name, require_non_negative, require_quantity},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivestockStatus {
    #[default]
    Active,
    Sold,
    Deceased,
    Quarantine,
}

impl LivestockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Deceased => "deceased",
            Self::Quarantine => "quarantine",
        }
    }
}

impl TryFrom<&str> for LivestockStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "deceased" => Ok(Self::Deceased),
            "quarantine" => Ok(Self::Quarantine),
            other => Err(EngineError::InvalidKind(format!(
                "invalid livestock status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Livestock {
    pub id: Uuid,
    /// Physical ear tag; unique across the herd.
    pub tag_number: String,
    pub species: String,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub status: LivestockStatus,
    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_cost: Option<MoneyCents>,
    pub sale_price: Option<MoneyCents>,
    pub current_weight: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LivestockNew {
    pub tag_number: String,
    pub species: String,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub status: Option<LivestockStatus>,
    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_cost: Option<MoneyCents>,
    pub current_weight: Option<f64>,
    pub notes: Option<String>,
}

/// Partial update; `None` keeps the stored value.
///
/// Setting `sale_price` records a sale; the status is left to the caller so a
/// price can be corrected without touching it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LivestockUpdate {
    pub tag_number: Option<String>,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub status: Option<LivestockStatus>,
    pub acquisition_cost: Option<MoneyCents>,
    pub sale_price: Option<MoneyCents>,
    pub current_weight: Option<f64>,
    pub notes: Option<String>,
}

impl Livestock {
    pub(crate) fn new(input: LivestockNew) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            tag_number: normalize_required_name(&input.tag_number, "tag number")?,
            species: normalize_required_name(&input.species, "species")?,
            breed: normalize_optional_text(input.breed.as_deref()),
            date_of_birth: input.date_of_birth,
            gender: normalize_optional_text(input.gender.as_deref()),
            status: input.status.unwrap_or_default(),
            acquisition_date: input.acquisition_date,
            acquisition_cost: input
                .acquisition_cost
                .map(|cost| require_non_negative(cost, "acquisition_cost"))
                .transpose()?,
            sale_price: None,
            current_weight: input
                .current_weight
                .map(|w| require_quantity(w, "current_weight"))
                .transpose()?,
            notes: normalize_optional_text(input.notes.as_deref()),
        })
    }

    pub(crate) fn apply(&mut self, update: LivestockUpdate) -> ResultEngine<()> {
        if let Some(tag) = update.tag_number {
            self.tag_number = normalize_required_name(&tag, "tag number")?;
        }
        if update.breed.is_some() {
            self.breed = normalize_optional_text(update.breed.as_deref());
        }
        if update.date_of_birth.is_some() {
            self.date_of_birth = update.date_of_birth;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(cost) = update.acquisition_cost {
            self.acquisition_cost = Some(require_non_negative(cost, "acquisition_cost")?);
        }
        if let Some(price) = update.sale_price {
            self.sale_price = Some(require_non_negative(price, "sale_price")?);
        }
        if let Some(weight) = update.current_weight {
            self.current_weight = Some(require_quantity(weight, "current_weight")?);
        }
        if update.notes.is_some() {
            self.notes = normalize_optional_text(update.notes.as_deref());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "livestock")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub tag_number: String,
    pub species: String,
    pub breed: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub status: String,
    pub acquisition_date: Option<Date>,
    pub acquisition_cost_minor: Option<i64>,
    pub sale_price_minor: Option<i64>,
    pub current_weight: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::health_records::Entity")]
    HealthRecords,
}

impl Related<super::health_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HealthRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Livestock {
    type Error = EngineError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            tag_number: value.tag_number,
            species: value.species,
            breed: value.breed,
            date_of_birth: value.date_of_birth,
            gender: value.gender,
            status: LivestockStatus::try_from(value.status.as_str())?,
            acquisition_date: value.acquisition_date,
            acquisition_cost: value.acquisition_cost_minor.map(MoneyCents::new),
            sale_price: value.sale_price_minor.map(MoneyCents::new),
            current_weight: value.current_weight,
            notes: value.notes,
        })
    }
}

impl From<&Livestock> for ActiveModel {
    fn from(value: &Livestock) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            tag_number: ActiveValue::Set(value.tag_number.clone()),
            species: ActiveValue::Set(value.species.clone()),
            breed: ActiveValue::Set(value.breed.clone()),
            date_of_birth: ActiveValue::Set(value.date_of_birth),
            gender: ActiveValue::Set(value.gender.clone()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            acquisition_date: ActiveValue::Set(value.acquisition_date),
            acquisition_cost_minor: ActiveValue::Set(value.acquisition_cost.map(MoneyCents::cents)),
            sale_price_minor: ActiveValue::Set(value.sale_price.map(MoneyCents::cents)),
            current_weight: ActiveValue::Set(value.current_weight),
            notes: ActiveValue::Set(value.notes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cow() -> Livestock {
        Livestock::new(LivestockNew {
            tag_number: "C-001".to_string(),
            species: "cattle".to_string(),
            acquisition_cost: Some(MoneyCents::from_units(800)),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn new_animal_is_active_and_unsold() {
        let cow = cow();
        assert_eq!(cow.status, LivestockStatus::Active);
        assert_eq!(cow.sale_price, None);
    }

    #[test]
    fn blank_species_is_rejected() {
        let err = Livestock::new(LivestockNew {
            tag_number: "X".to_string(),
            species: " ".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidName(_)));
    }

    #[test]
    fn sale_updates_price_and_status() {
        let mut cow = cow();
        cow.apply(LivestockUpdate {
            status: Some(LivestockStatus::Sold),
            sale_price: Some(MoneyCents::from_units(1200)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cow.status, LivestockStatus::Sold);
        assert_eq!(cow.sale_price, Some(MoneyCents::from_units(1200)));
    }
}
