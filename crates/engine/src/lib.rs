//! Farm records and the analytics computed over them.
//!
//! The [`Engine`] owns the database connection and exposes the record store
//! (crops, livestock, finances, labor). Summaries and reports live in
//! [`analytics`]; they are pure functions over a [`FarmSnapshot`].

pub use analytics::{
    ActivityLabor, BudgetSummary, CategoryBudget, CropPerformance, CropSummary, DateWindow,
    Dashboard, FarmReport, FarmSnapshot, FinancialSummary, HealthSummary, LaborStatistics,
    LaborSummary, LaborUtilization, LandUtilization, LivestockSummary, ProfitabilityAnalysis,
    ReportKind, ResourceUtilization, Tally, WorkerLabor,
};
pub use budgets::{Budget, BudgetNew, BudgetUpdate, BudgetView};
pub use crop_cycles::{CropCycle, CropCycleNew, CropCycleUpdate, CycleStatus};
pub use crops::{Crop, CropNew, CropUpdate};
pub use error::EngineError;
pub use health_records::{HealthRecord, HealthRecordNew, HealthRecordUpdate};
pub use livestock::{Livestock, LivestockNew, LivestockStatus, LivestockUpdate};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, LivestockFilter, TransactionFilter, WorkLogFilter};
pub use transactions::{EntryKind, FinancialEntry, FinancialEntryNew, FinancialEntryUpdate};
pub use work_logs::{LaborEntry, LaborEntryNew, LaborEntryUpdate};
pub use workers::{Worker, WorkerNew, WorkerStatus, WorkerUpdate};

pub mod analytics;
mod budgets;
mod crop_cycles;
mod crops;
mod error;
mod health_records;
mod livestock;
mod money;
mod ops;
mod transactions;
mod util;
mod work_logs;
mod workers;

type ResultEngine<T> = Result<T, EngineError>;
