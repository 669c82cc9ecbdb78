use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{
    DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, LaborEntry, LaborEntryNew, LaborEntryUpdate, ResultEngine, Worker, WorkerNew,
    WorkerStatus, WorkerUpdate, work_logs, workers,
};

use super::{Engine, with_tx};

/// Filters for listing work logs.
///
/// `from` and `to` are both inclusive.
#[derive(Clone, Debug, Default)]
pub struct WorkLogFilter {
    pub worker_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Engine {
    /// Hires a worker. Employee ids, when given, are unique.
    pub async fn new_worker(&self, input: WorkerNew) -> ResultEngine<Worker> {
        let worker = Worker::new(input)?;
        with_tx!(self, |db_tx| {
            self.ensure_employee_id_free(&db_tx, worker.employee_id.as_deref())
                .await?;
            workers::ActiveModel::from(&worker).insert(&db_tx).await?;
            Ok(worker)
        })
    }

    pub async fn worker(&self, worker_id: Uuid) -> ResultEngine<Worker> {
        with_tx!(self, |db_tx| self.require_worker(&db_tx, worker_id).await)
    }

    /// Workers, optionally only those in `status`, by last name.
    pub async fn list_workers(&self, status: Option<WorkerStatus>) -> ResultEngine<Vec<Worker>> {
        let mut query = workers::Entity::find();
        if let Some(status) = status {
            query = query.filter(workers::Column::Status.eq(status.as_str()));
        }
        query
            .order_by_asc(workers::Column::LastName)
            .order_by_asc(workers::Column::FirstName)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Worker::try_from)
            .collect()
    }

    pub async fn update_worker(&self, worker_id: Uuid, update: WorkerUpdate) -> ResultEngine<Worker> {
        with_tx!(self, |db_tx| {
            let mut worker = self.require_worker(&db_tx, worker_id).await?;
            worker.apply(update)?;
            workers::ActiveModel::from(&worker).update(&db_tx).await?;
            Ok(worker)
        })
    }

    /// Deletes a worker together with their work logs.
    pub async fn delete_worker(&self, worker_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_worker(&db_tx, worker_id).await?;
            work_logs::Entity::delete_many()
                .filter(work_logs::Column::WorkerId.eq(worker_id))
                .exec(&db_tx)
                .await?;
            workers::Entity::delete_by_id(worker_id).exec(&db_tx).await?;
            Ok(())
        })
    }

    pub async fn count_active_workers(&self) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| self.active_workers(&db_tx).await)
    }

    pub async fn new_work_log(&self, input: LaborEntryNew) -> ResultEngine<LaborEntry> {
        with_tx!(self, |db_tx| {
            let worker = self.require_worker(&db_tx, input.worker_id).await?;
            let entry = LaborEntry::new(input, &worker)?;
            work_logs::ActiveModel::from(&entry).insert(&db_tx).await?;
            Ok(entry)
        })
    }

    pub async fn work_log(&self, log_id: Uuid) -> ResultEngine<LaborEntry> {
        with_tx!(self, |db_tx| self.require_work_log(&db_tx, log_id).await)
    }

    /// Work logs matching `filter`, newest first.
    pub async fn list_labor_entries(&self, filter: &WorkLogFilter) -> ResultEngine<Vec<LaborEntry>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to)
            && from > to
        {
            return Err(EngineError::InvalidDate(
                "invalid range: start_date must not be after end_date".to_string(),
            ));
        }
        with_tx!(self, |db_tx| self.work_logs_in(&db_tx, filter).await)
    }

    pub async fn update_work_log(
        &self,
        log_id: Uuid,
        update: LaborEntryUpdate,
    ) -> ResultEngine<LaborEntry> {
        with_tx!(self, |db_tx| {
            let mut entry = self.require_work_log(&db_tx, log_id).await?;
            entry.apply(update)?;
            work_logs::ActiveModel::from(&entry).update(&db_tx).await?;
            Ok(entry)
        })
    }

    pub async fn delete_work_log(&self, log_id: Uuid) -> ResultEngine<()> {
        let result = work_logs::Entity::delete_by_id(log_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("work log not exists".to_string()));
        }
        Ok(())
    }

    pub(super) async fn work_logs_in(
        &self,
        db_tx: &DatabaseTransaction,
        filter: &WorkLogFilter,
    ) -> ResultEngine<Vec<LaborEntry>> {
        let mut query = work_logs::Entity::find().find_also_related(workers::Entity);
        if let Some(worker_id) = filter.worker_id {
            query = query.filter(work_logs::Column::WorkerId.eq(worker_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(work_logs::Column::WorkDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(work_logs::Column::WorkDate.lte(to));
        }
        query
            .order_by_desc(work_logs::Column::WorkDate)
            .all(db_tx)
            .await?
            .into_iter()
            .map(|(model, worker)| log_with_worker(model, worker))
            .collect()
    }

    pub(super) async fn active_workers(&self, db_tx: &DatabaseTransaction) -> ResultEngine<u64> {
        let count = workers::Entity::find()
            .filter(workers::Column::Status.eq(WorkerStatus::Active.as_str()))
            .count(db_tx)
            .await?;
        Ok(count)
    }

    async fn require_worker(
        &self,
        db_tx: &DatabaseTransaction,
        worker_id: Uuid,
    ) -> ResultEngine<Worker> {
        let model = workers::Entity::find_by_id(worker_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("worker not exists".to_string()))?;
        Worker::try_from(model)
    }

    async fn require_work_log(
        &self,
        db_tx: &DatabaseTransaction,
        log_id: Uuid,
    ) -> ResultEngine<LaborEntry> {
        let (model, worker) = work_logs::Entity::find_by_id(log_id)
            .find_also_related(workers::Entity)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("work log not exists".to_string()))?;
        log_with_worker(model, worker)
    }

    async fn ensure_employee_id_free(
        &self,
        db_tx: &DatabaseTransaction,
        employee_id: Option<&str>,
    ) -> ResultEngine<()> {
        let Some(employee_id) = employee_id else {
            return Ok(());
        };
        let taken = workers::Entity::find()
            .filter(workers::Column::EmployeeId.eq(employee_id))
            .one(db_tx)
            .await?
            .is_some();
        if taken {
            return Err(EngineError::ExistingKey(employee_id.to_string()));
        }
        Ok(())
    }
}

fn log_with_worker(
    model: work_logs::Model,
    worker: Option<workers::Model>,
) -> ResultEngine<LaborEntry> {
    let worker = worker.ok_or_else(|| EngineError::KeyNotFound("worker not exists".to_string()))?;
    let worker = Worker::try_from(worker)?;
    Ok(LaborEntry::from_model(model, &worker))
}
