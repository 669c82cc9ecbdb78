use uuid::Uuid;

use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Crop, CropCycle, CropCycleNew, CropCycleUpdate, CropNew, CropUpdate, CycleStatus, EngineError,
    ResultEngine, crop_cycles, crops,
};

use super::{Engine, with_tx};

impl Engine {
    /// Registers a crop in the catalogue.
    pub async fn new_crop(&self, input: CropNew) -> ResultEngine<Crop> {
        let crop = Crop::new(input)?;
        crops::ActiveModel::from(&crop).insert(&self.database).await?;
        Ok(crop)
    }

    pub async fn crop(&self, crop_id: Uuid) -> ResultEngine<Crop> {
        with_tx!(self, |db_tx| {
            let model = self.require_crop(&db_tx, crop_id).await?;
            Ok(Crop::from(model))
        })
    }

    /// All crops, by name.
    pub async fn list_crops(&self) -> ResultEngine<Vec<Crop>> {
        let models = crops::Entity::find()
            .order_by_asc(crops::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Crop::from).collect())
    }

    pub async fn update_crop(&self, crop_id: Uuid, update: CropUpdate) -> ResultEngine<Crop> {
        with_tx!(self, |db_tx| {
            let mut crop = Crop::from(self.require_crop(&db_tx, crop_id).await?);
            crop.apply(update)?;
            crops::ActiveModel::from(&crop).update(&db_tx).await?;
            Ok(crop)
        })
    }

    /// Deletes a crop together with its cycles.
    pub async fn delete_crop(&self, crop_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_crop(&db_tx, crop_id).await?;
            crop_cycles::Entity::delete_many()
                .filter(crop_cycles::Column::CropId.eq(crop_id))
                .exec(&db_tx)
                .await?;
            crops::Entity::delete_by_id(crop_id).exec(&db_tx).await?;
            Ok(())
        })
    }

    /// Starts a cycle of an existing crop.
    pub async fn new_crop_cycle(&self, input: CropCycleNew) -> ResultEngine<CropCycle> {
        with_tx!(self, |db_tx| {
            let crop = self.require_crop(&db_tx, input.crop_id).await?;
            let cycle = CropCycle::new(input, crop.name)?;
            crop_cycles::ActiveModel::from(&cycle).insert(&db_tx).await?;
            Ok(cycle)
        })
    }

    pub async fn crop_cycle(&self, cycle_id: Uuid) -> ResultEngine<CropCycle> {
        let (model, crop) = crop_cycles::Entity::find_by_id(cycle_id)
            .find_also_related(crops::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("crop cycle not exists".to_string()))?;
        cycle_with_crop(model, crop)
    }

    /// Crop cycles, optionally only those in `status`, newest planting first.
    pub async fn list_crop_cycles(&self, status: Option<CycleStatus>) -> ResultEngine<Vec<CropCycle>> {
        with_tx!(self, |db_tx| self.crop_cycles_in(&db_tx, status).await)
    }

    pub async fn update_crop_cycle(
        &self,
        cycle_id: Uuid,
        update: CropCycleUpdate,
    ) -> ResultEngine<CropCycle> {
        with_tx!(self, |db_tx| {
            let (model, crop) = crop_cycles::Entity::find_by_id(cycle_id)
                .find_also_related(crops::Entity)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("crop cycle not exists".to_string()))?;
            let mut cycle = cycle_with_crop(model, crop)?;
            cycle.apply(update)?;
            crop_cycles::ActiveModel::from(&cycle).update(&db_tx).await?;
            Ok(cycle)
        })
    }

    pub async fn delete_crop_cycle(&self, cycle_id: Uuid) -> ResultEngine<()> {
        let result = crop_cycles::Entity::delete_by_id(cycle_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("crop cycle not exists".to_string()));
        }
        Ok(())
    }

    pub(super) async fn crop_cycles_in(
        &self,
        db_tx: &DatabaseTransaction,
        status: Option<CycleStatus>,
    ) -> ResultEngine<Vec<CropCycle>> {
        let mut query = crop_cycles::Entity::find().find_also_related(crops::Entity);
        if let Some(status) = status {
            query = query.filter(crop_cycles::Column::Status.eq(status.as_str()));
        }
        query
            .order_by_desc(crop_cycles::Column::PlantingDate)
            .all(db_tx)
            .await?
            .into_iter()
            .map(|(model, crop)| cycle_with_crop(model, crop))
            .collect()
    }

    async fn require_crop(
        &self,
        db_tx: &DatabaseTransaction,
        crop_id: Uuid,
    ) -> ResultEngine<crops::Model> {
        crops::Entity::find_by_id(crop_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("crop not exists".to_string()))
    }
}

fn cycle_with_crop(model: crop_cycles::Model, crop: Option<crops::Model>) -> ResultEngine<CropCycle> {
    let crop = crop.ok_or_else(|| EngineError::KeyNotFound("crop not exists".to_string()))?;
    CropCycle::from_model(model, crop.name)
}
