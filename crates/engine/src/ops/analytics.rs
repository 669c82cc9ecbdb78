use chrono::NaiveDate;

use sea_orm::TransactionTrait;

use crate::{
    BudgetSummary, CropPerformance, CropSummary, CycleStatus, Dashboard, DateWindow, EngineError,
    FarmReport, FarmSnapshot, FinancialSummary, HealthRecord, HealthSummary, LaborStatistics,
    Livestock, LivestockFilter, LivestockSummary, ProfitabilityAnalysis, ReportKind,
    ResourceUtilization, ResultEngine, TransactionFilter, WorkLogFilter,
    analytics::{
        HEALTH_WINDOW_DAYS, LABOR_WINDOW_DAYS, crops, financial, labor, livestock, report,
    },
};

use super::{Engine, with_tx};

impl Engine {
    /// Reads every collection the reports need, inside one DB transaction.
    pub async fn snapshot(&self) -> ResultEngine<FarmSnapshot> {
        let snapshot = with_tx!(self, |db_tx| {
            Ok::<_, EngineError>(FarmSnapshot {
                entries: self
                    .transactions_in(&db_tx, &TransactionFilter::default())
                    .await?,
                budgets: self.budgets_in(&db_tx, None).await?,
                cycles: self.crop_cycles_in(&db_tx, None).await?,
                livestock: self
                    .livestock_in(&db_tx, &LivestockFilter::default())
                    .await?,
                health_records: self.health_records_since(&db_tx, None).await?,
                labor: self.work_logs_in(&db_tx, &WorkLogFilter::default()).await?,
                active_workers: self.active_workers(&db_tx).await?,
            })
        })?;
        tracing::debug!(
            entries = snapshot.entries.len(),
            cycles = snapshot.cycles.len(),
            livestock = snapshot.livestock.len(),
            work_logs = snapshot.labor.len(),
            "farm snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Ledger summary, optionally limited to `[from, to]`.
    pub async fn financial_summary(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ResultEngine<FinancialSummary> {
        let entries = self
            .list_financial_entries(&TransactionFilter {
                from,
                to,
                ..Default::default()
            })
            .await?;
        Ok(financial::summary(&entries))
    }

    pub async fn budget_summary(&self, fiscal_year: i32) -> ResultEngine<BudgetSummary> {
        let (budgets, entries) = with_tx!(self, |db_tx| {
            let budgets = self.budgets_in(&db_tx, Some(fiscal_year)).await?;
            let entries = self
                .transactions_in(&db_tx, &TransactionFilter::default())
                .await?;
            Ok::<_, EngineError>((budgets, entries))
        })?;
        Ok(financial::budget_summary(fiscal_year, &budgets, &entries))
    }

    pub async fn crop_summary(&self) -> ResultEngine<CropSummary> {
        let cycles = self.list_crop_cycles(None).await?;
        Ok(crops::crop_summary(&cycles))
    }

    pub async fn crop_performance(&self) -> ResultEngine<Vec<CropPerformance>> {
        let cycles = self.list_crop_cycles(Some(CycleStatus::Harvested)).await?;
        Ok(crops::performance_by_crop(&cycles))
    }

    pub async fn livestock_summary(&self) -> ResultEngine<LivestockSummary> {
        let (animals, records) = self.herd_with_records(None).await?;
        Ok(livestock::livestock_summary(&animals, &records))
    }

    /// Health activity of the 90 days before `today`.
    pub async fn livestock_health(&self, today: NaiveDate) -> ResultEngine<HealthSummary> {
        let since = DateWindow::last_days(today, HEALTH_WINDOW_DAYS).start;
        let (animals, records) = self.herd_with_records(Some(since)).await?;
        Ok(livestock::health_summary(&animals, &records, today))
    }

    /// Labor in `window`, or the 30 days before `today` when `None`.
    pub async fn labor_statistics(
        &self,
        window: Option<DateWindow>,
        today: NaiveDate,
    ) -> ResultEngine<LaborStatistics> {
        let window = window.unwrap_or_else(|| DateWindow::last_days(today, LABOR_WINDOW_DAYS));
        let (entries, active_workers) = with_tx!(self, |db_tx| {
            let filter = WorkLogFilter {
                from: Some(window.start),
                to: Some(window.end),
                ..Default::default()
            };
            let entries = self.work_logs_in(&db_tx, &filter).await?;
            let active = self.active_workers(&db_tx).await?;
            Ok::<_, EngineError>((entries, active))
        })?;
        Ok(labor::labor_statistics(window, &entries, active_workers))
    }

    pub async fn profitability(&self) -> ResultEngine<ProfitabilityAnalysis> {
        let snapshot = self.snapshot().await?;
        Ok(report::profitability(
            &financial::summary(&snapshot.entries),
            &crops::crop_summary(&snapshot.cycles),
            &livestock::livestock_summary(&snapshot.livestock, &snapshot.health_records),
        ))
    }

    pub async fn resource_utilization(&self) -> ResultEngine<ResourceUtilization> {
        let snapshot = self.snapshot().await?;
        Ok(report::resource_utilization(
            &crops::crop_summary(&snapshot.cycles),
            &labor::labor_summary(&snapshot.labor),
        ))
    }

    pub async fn dashboard(&self, today: NaiveDate) -> ResultEngine<Dashboard> {
        let snapshot = self.snapshot().await?;
        Ok(report::dashboard(&snapshot, today))
    }

    /// Builds the report named `kind` (`financial` or `comprehensive`).
    pub async fn report(&self, kind: &str, today: NaiveDate) -> ResultEngine<FarmReport> {
        let kind: ReportKind = kind.parse()?;
        let snapshot = self.snapshot().await?;
        tracing::info!(%kind, farm = %self.farm_name, "generating report");
        Ok(report::generate_report(kind, &self.farm_name, &snapshot, today))
    }

    async fn herd_with_records(
        &self,
        since: Option<NaiveDate>,
    ) -> ResultEngine<(Vec<Livestock>, Vec<HealthRecord>)> {
        with_tx!(self, |db_tx| {
            let animals = self
                .livestock_in(&db_tx, &LivestockFilter::default())
                .await?;
            let records = self.health_records_since(&db_tx, since).await?;
            Ok((animals, records))
        })
    }
}
