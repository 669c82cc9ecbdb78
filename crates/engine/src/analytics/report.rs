//! Combines the per-domain summaries into dashboards and reports.
//!
//! Nothing is computed here that the aggregators do not already compute:
//! profitability and resource utilization are projections of their results.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{EngineError, MoneyCents};

use super::{
    BudgetSummary, CropPerformance, CropSummary, DateWindow, FarmSnapshot, FinancialSummary,
    HealthSummary, LABOR_WINDOW_DAYS, LaborStatistics, LaborSummary, LivestockSummary, crops,
    financial, labor, livestock,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfitabilityAnalysis {
    pub overall_net_profit: MoneyCents,
    pub crop_profit: MoneyCents,
    /// Same value as [`LivestockSummary::profit_from_sales`].
    pub livestock_profit: MoneyCents,
    pub profit_margin: f64,
    pub total_revenue: MoneyCents,
    pub total_expenses: MoneyCents,
}

pub fn profitability(
    financial: &FinancialSummary,
    crops: &CropSummary,
    livestock: &LivestockSummary,
) -> ProfitabilityAnalysis {
    ProfitabilityAnalysis {
        overall_net_profit: financial.net_profit,
        crop_profit: crops.total_profit,
        livestock_profit: livestock.profit_from_sales,
        profit_margin: financial.profit_margin,
        total_revenue: financial.total_income,
        total_expenses: financial.total_expenses,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LandUtilization {
    /// Hectares.
    pub total_area: f64,
    pub crop_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LaborUtilization {
    pub total_hours: f64,
    pub total_cost: MoneyCents,
    pub worker_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResourceUtilization {
    pub land_utilization: LandUtilization,
    pub labor_utilization: LaborUtilization,
}

pub fn resource_utilization(crops: &CropSummary, labor: &LaborSummary) -> ResourceUtilization {
    ResourceUtilization {
        land_utilization: LandUtilization {
            total_area: crops.total_area,
            crop_count: crops.total_crops,
        },
        labor_utilization: LaborUtilization {
            total_hours: labor.total_hours,
            total_cost: labor.total_cost,
            worker_count: labor.worker_count,
        },
    }
}

/// Everything at once, as shown on the landing page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub generated_on: NaiveDate,
    pub financial_summary: FinancialSummary,
    /// Fiscal year of `generated_on`.
    pub budget_summary: BudgetSummary,
    pub crop_summary: CropSummary,
    pub crop_performance: Vec<CropPerformance>,
    pub livestock_summary: LivestockSummary,
    pub livestock_health: HealthSummary,
    /// Last [`LABOR_WINDOW_DAYS`] days.
    pub labor_statistics: LaborStatistics,
    pub profitability_analysis: ProfitabilityAnalysis,
    pub resource_utilization: ResourceUtilization,
}

pub fn dashboard(snapshot: &FarmSnapshot, today: NaiveDate) -> Dashboard {
    let financial_summary = financial::summary(&snapshot.entries);
    let crop_summary = crops::crop_summary(&snapshot.cycles);
    let livestock_summary =
        livestock::livestock_summary(&snapshot.livestock, &snapshot.health_records);
    let labor_summary = labor::labor_summary(&snapshot.labor);

    Dashboard {
        generated_on: today,
        budget_summary: financial::budget_summary(
            today.year(),
            &snapshot.budgets,
            &snapshot.entries,
        ),
        crop_performance: crops::performance_by_crop(&snapshot.cycles),
        livestock_health: livestock::health_summary(
            &snapshot.livestock,
            &snapshot.health_records,
            today,
        ),
        labor_statistics: labor::labor_statistics(
            DateWindow::last_days(today, LABOR_WINDOW_DAYS),
            &snapshot.labor,
            snapshot.active_workers,
        ),
        profitability_analysis: profitability(
            &financial_summary,
            &crop_summary,
            &livestock_summary,
        ),
        resource_utilization: resource_utilization(&crop_summary, &labor_summary),
        financial_summary,
        crop_summary,
        livestock_summary,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Ledger totals and profitability only.
    Financial,
    /// Every domain.
    Comprehensive,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "financial" => Ok(Self::Financial),
            "comprehensive" => Ok(Self::Comprehensive),
            other => Err(EngineError::UnknownReport(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FarmReport {
    pub report_date: NaiveDate,
    pub farm_name: String,
    pub kind: ReportKind,
    pub financial_summary: FinancialSummary,
    pub profitability_analysis: ProfitabilityAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_summary: Option<CropSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub livestock_summary: Option<LivestockSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_summary: Option<LaborSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_utilization: Option<ResourceUtilization>,
}

/// Builds a report of `kind` over the whole snapshot.
///
/// Labor is summarized over every work log, not the dashboard window.
pub fn generate_report(
    kind: ReportKind,
    farm_name: &str,
    snapshot: &FarmSnapshot,
    today: NaiveDate,
) -> FarmReport {
    let financial_summary = financial::summary(&snapshot.entries);
    let crop_summary = crops::crop_summary(&snapshot.cycles);
    let livestock_summary =
        livestock::livestock_summary(&snapshot.livestock, &snapshot.health_records);
    let profitability_analysis =
        profitability(&financial_summary, &crop_summary, &livestock_summary);

    let mut report = FarmReport {
        report_date: today,
        farm_name: farm_name.to_string(),
        kind,
        financial_summary,
        profitability_analysis,
        crop_summary: None,
        livestock_summary: None,
        labor_summary: None,
        resource_utilization: None,
    };

    if kind == ReportKind::Comprehensive {
        let labor_summary = labor::labor_summary(&snapshot.labor);
        report.resource_utilization = Some(resource_utilization(&crop_summary, &labor_summary));
        report.crop_summary = Some(crop_summary);
        report.livestock_summary = Some(livestock_summary);
        report.labor_summary = Some(labor_summary);
    }

    report
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{
        CropCycle, CycleStatus, EntryKind, FinancialEntry, LaborEntry, Livestock, LivestockStatus,
    };

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn entry(kind: EntryKind, category: &str, units: i64) -> FinancialEntry {
        FinancialEntry {
            id: Uuid::new_v4(),
            date: day(2025, 5, 1),
            kind,
            category: category.to_string(),
            amount: MoneyCents::from_units(units),
            description: category.to_string(),
            budget_id: None,
            payment_method: None,
            reference_number: None,
            notes: None,
        }
    }

    fn snapshot() -> FarmSnapshot {
        let cycle = CropCycle {
            id: Uuid::new_v4(),
            crop_id: Uuid::new_v4(),
            crop_name: "Maize".to_string(),
            field_location: Some("North field".to_string()),
            area_hectares: 10.0,
            planting_date: Some(day(2025, 3, 1)),
            expected_harvest_date: None,
            actual_harvest_date: Some(day(2025, 6, 1)),
            status: CycleStatus::Harvested,
            yield_amount: Some(500.0),
            yield_unit: Some("kg".to_string()),
            expenses: MoneyCents::from_units(400),
            revenue: MoneyCents::from_units(1_500),
            notes: None,
        };
        let cow = Livestock {
            id: Uuid::new_v4(),
            tag_number: "C-1".to_string(),
            species: "cattle".to_string(),
            breed: None,
            date_of_birth: None,
            gender: None,
            status: LivestockStatus::Sold,
            acquisition_date: None,
            acquisition_cost: Some(MoneyCents::from_units(600)),
            sale_price: Some(MoneyCents::from_units(900)),
            current_weight: None,
            notes: None,
        };
        let shift = |date: NaiveDate, hours: f64| LaborEntry {
            id: Uuid::new_v4(),
            worker_id: Uuid::nil(),
            worker_name: "Ana Lima".to_string(),
            hourly_rate: Some(MoneyCents::from_units(15)),
            work_date: date,
            hours_worked: hours,
            activity_type: Some("harvesting".to_string()),
            location: None,
            description: None,
            notes: None,
        };

        FarmSnapshot {
            entries: vec![
                entry(EntryKind::Income, "crop_sales", 2000),
                entry(EntryKind::Expense, "seeds", 500),
            ],
            budgets: Vec::new(),
            cycles: vec![cycle],
            livestock: vec![cow],
            health_records: Vec::new(),
            labor: vec![shift(day(2025, 6, 20), 8.0), shift(day(2025, 1, 10), 2.0)],
            active_workers: 1,
        }
    }

    #[test]
    fn profitability_recombines_domain_results() {
        let snapshot = snapshot();
        let report = generate_report(ReportKind::Financial, "Green Acres", &snapshot, day(2025, 6, 30));
        let profit = &report.profitability_analysis;

        assert_eq!(profit.overall_net_profit, MoneyCents::from_units(1_500));
        assert_eq!(profit.profit_margin, 75.0);
        assert_eq!(profit.crop_profit, MoneyCents::from_units(1_100));
        assert_eq!(profit.livestock_profit, MoneyCents::from_units(300));
        assert_eq!(profit.total_revenue, MoneyCents::from_units(2_000));
        assert_eq!(profit.total_expenses, MoneyCents::from_units(500));
    }

    #[test]
    fn financial_report_omits_other_domains() {
        let report =
            generate_report(ReportKind::Financial, "Green Acres", &snapshot(), day(2025, 6, 30));
        assert!(report.crop_summary.is_none());
        assert!(report.resource_utilization.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "financial");
        assert_eq!(json["farm_name"], "Green Acres");
        assert!(json.get("crop_summary").is_none());
        assert!(json.get("labor_summary").is_none());
    }

    #[test]
    fn comprehensive_report_covers_all_labor() {
        let report = generate_report(
            ReportKind::Comprehensive,
            "Green Acres",
            &snapshot(),
            day(2025, 6, 30),
        );
        let labor = report.labor_summary.unwrap();
        assert_eq!(labor.total_hours, 10.0);

        let resources = report.resource_utilization.unwrap();
        assert_eq!(resources.land_utilization.total_area, 10.0);
        assert_eq!(resources.land_utilization.crop_count, 1);
        assert_eq!(resources.labor_utilization.total_cost, MoneyCents::from_units(150));
        assert_eq!(resources.labor_utilization.worker_count, 1);
        assert_eq!(report.crop_summary.unwrap().avg_yield_per_area, 50.0);
    }

    #[test]
    fn dashboard_windows_follow_today() {
        let dashboard = dashboard(&snapshot(), day(2025, 6, 30));

        assert_eq!(dashboard.budget_summary.fiscal_year, 2025);
        assert_eq!(dashboard.labor_statistics.start_date, day(2025, 5, 31));
        assert_eq!(dashboard.labor_statistics.summary.total_hours, 8.0);
        assert_eq!(dashboard.livestock_health.window_start, day(2025, 4, 1));
        assert_eq!(dashboard.crop_performance.len(), 1);
        assert_eq!(
            dashboard.resource_utilization.labor_utilization.total_hours,
            10.0
        );
    }

    #[test]
    fn empty_farm_dashboard_is_all_zero() {
        let dashboard = dashboard(&FarmSnapshot::default(), day(2025, 6, 30));
        assert_eq!(dashboard.financial_summary, FinancialSummary::default());
        assert_eq!(dashboard.crop_summary, CropSummary::default());
        assert_eq!(dashboard.livestock_summary, LivestockSummary::default());
        assert_eq!(dashboard.labor_statistics.summary, LaborSummary::default());
        assert_eq!(dashboard.profitability_analysis, ProfitabilityAnalysis::default());
    }

    #[test]
    fn unknown_report_kind_is_an_error() {
        let err = "bogus".parse::<ReportKind>().unwrap_err();
        assert_eq!(err, EngineError::UnknownReport("bogus".to_string()));
        assert_eq!(err.to_string(), "Unknown report type: bogus");
        assert_eq!("comprehensive".parse::<ReportKind>().unwrap(), ReportKind::Comprehensive);
    }
}
