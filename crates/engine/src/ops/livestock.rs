use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, HealthRecord, HealthRecordNew, HealthRecordUpdate, Livestock, LivestockNew,
    LivestockStatus, LivestockUpdate, ResultEngine, health_records, livestock,
};

use super::{Engine, with_tx};

/// Filters for listing animals. `None` matches everything.
#[derive(Clone, Debug, Default)]
pub struct LivestockFilter {
    pub species: Option<String>,
    pub status: Option<LivestockStatus>,
}

impl Engine {
    /// Registers an animal. Tag numbers are unique.
    pub async fn new_livestock(&self, input: LivestockNew) -> ResultEngine<Livestock> {
        let animal = Livestock::new(input)?;
        with_tx!(self, |db_tx| {
            self.ensure_tag_free(&db_tx, &animal.tag_number, None).await?;
            livestock::ActiveModel::from(&animal).insert(&db_tx).await?;
            Ok(animal)
        })
    }

    pub async fn livestock(&self, livestock_id: Uuid) -> ResultEngine<Livestock> {
        with_tx!(self, |db_tx| {
            let model = self.require_livestock(&db_tx, livestock_id).await?;
            Livestock::try_from(model)
        })
    }

    /// Animals matching `filter`, by tag number.
    pub async fn list_livestock(&self, filter: &LivestockFilter) -> ResultEngine<Vec<Livestock>> {
        with_tx!(self, |db_tx| self.livestock_in(&db_tx, filter).await)
    }

    pub async fn update_livestock(
        &self,
        livestock_id: Uuid,
        update: LivestockUpdate,
    ) -> ResultEngine<Livestock> {
        with_tx!(self, |db_tx| {
            let model = self.require_livestock(&db_tx, livestock_id).await?;
            let mut animal = Livestock::try_from(model)?;
            animal.apply(update)?;
            self.ensure_tag_free(&db_tx, &animal.tag_number, Some(livestock_id))
                .await?;
            livestock::ActiveModel::from(&animal).update(&db_tx).await?;
            Ok(animal)
        })
    }

    /// Deletes an animal and its health history.
    pub async fn delete_livestock(&self, livestock_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_livestock(&db_tx, livestock_id).await?;
            health_records::Entity::delete_many()
                .filter(health_records::Column::LivestockId.eq(livestock_id))
                .exec(&db_tx)
                .await?;
            livestock::Entity::delete_by_id(livestock_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    pub async fn new_health_record(&self, input: HealthRecordNew) -> ResultEngine<HealthRecord> {
        let record = HealthRecord::new(input)?;
        with_tx!(self, |db_tx| {
            self.require_livestock(&db_tx, record.livestock_id).await?;
            health_records::ActiveModel::from(&record)
                .insert(&db_tx)
                .await?;
            Ok(record)
        })
    }

    pub async fn health_record(&self, record_id: Uuid) -> ResultEngine<HealthRecord> {
        let model = health_records::Entity::find_by_id(record_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("health record not exists".to_string()))?;
        Ok(HealthRecord::from(model))
    }

    /// Health records dated on or after `since` (all when `None`), newest first.
    pub async fn list_health_records(
        &self,
        since: Option<NaiveDate>,
    ) -> ResultEngine<Vec<HealthRecord>> {
        with_tx!(self, |db_tx| self.health_records_since(&db_tx, since).await)
    }

    /// History of one animal, newest first.
    pub async fn health_records_for(&self, livestock_id: Uuid) -> ResultEngine<Vec<HealthRecord>> {
        with_tx!(self, |db_tx| {
            self.require_livestock(&db_tx, livestock_id).await?;
            let models = health_records::Entity::find()
                .filter(health_records::Column::LivestockId.eq(livestock_id))
                .order_by_desc(health_records::Column::RecordDate)
                .all(&db_tx)
                .await?;
            Ok(models.into_iter().map(HealthRecord::from).collect())
        })
    }

    pub async fn update_health_record(
        &self,
        record_id: Uuid,
        update: HealthRecordUpdate,
    ) -> ResultEngine<HealthRecord> {
        with_tx!(self, |db_tx| {
            let mut record = health_records::Entity::find_by_id(record_id)
                .one(&db_tx)
                .await?
                .map(HealthRecord::from)
                .ok_or_else(|| EngineError::KeyNotFound("health record not exists".to_string()))?;
            record.apply(update)?;
            health_records::ActiveModel::from(&record)
                .update(&db_tx)
                .await?;
            Ok(record)
        })
    }

    pub async fn delete_health_record(&self, record_id: Uuid) -> ResultEngine<()> {
        let result = health_records::Entity::delete_by_id(record_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "health record not exists".to_string(),
            ));
        }
        Ok(())
    }

    pub(super) async fn livestock_in(
        &self,
        db_tx: &DatabaseTransaction,
        filter: &LivestockFilter,
    ) -> ResultEngine<Vec<Livestock>> {
        let mut query = livestock::Entity::find();
        if let Some(species) = &filter.species {
            query = query.filter(livestock::Column::Species.eq(species.trim()));
        }
        if let Some(status) = filter.status {
            query = query.filter(livestock::Column::Status.eq(status.as_str()));
        }
        query
            .order_by_asc(livestock::Column::TagNumber)
            .all(db_tx)
            .await?
            .into_iter()
            .map(Livestock::try_from)
            .collect()
    }

    pub(super) async fn health_records_since(
        &self,
        db_tx: &DatabaseTransaction,
        since: Option<NaiveDate>,
    ) -> ResultEngine<Vec<HealthRecord>> {
        let mut query = health_records::Entity::find();
        if let Some(since) = since {
            query = query.filter(health_records::Column::RecordDate.gte(since));
        }
        let models = query
            .order_by_desc(health_records::Column::RecordDate)
            .all(db_tx)
            .await?;
        Ok(models.into_iter().map(HealthRecord::from).collect())
    }

    async fn require_livestock(
        &self,
        db_tx: &DatabaseTransaction,
        livestock_id: Uuid,
    ) -> ResultEngine<livestock::Model> {
        livestock::Entity::find_by_id(livestock_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("livestock not exists".to_string()))
    }

    async fn ensure_tag_free(
        &self,
        db_tx: &DatabaseTransaction,
        tag_number: &str,
        except: Option<Uuid>,
    ) -> ResultEngine<()> {
        let mut query =
            livestock::Entity::find().filter(livestock::Column::TagNumber.eq(tag_number));
        if let Some(livestock_id) = except {
            query = query.filter(livestock::Column::Id.ne(livestock_id));
        }
        if query.one(db_tx).await?.is_some() {
            return Err(EngineError::ExistingKey(tag_number.to_string()));
        }
        Ok(())
    }
}
