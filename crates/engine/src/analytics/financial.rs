//! Income, expenses and budget tracking.

use chrono::Datelike;
use serde::Serialize;

use crate::{Budget, EntryKind, FinancialEntry, MoneyCents};

use super::Tally;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_income: MoneyCents,
    pub total_expenses: MoneyCents,
    pub net_profit: MoneyCents,
    /// `net_profit / total_income × 100`, `0` without income.
    pub profit_margin: f64,
    pub income_by_category: Tally<MoneyCents>,
    pub expense_by_category: Tally<MoneyCents>,
    pub record_count: usize,
}

/// Totals and per-category breakdown of a ledger slice.
pub fn summary(entries: &[FinancialEntry]) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for entry in entries {
        match entry.kind {
            EntryKind::Income => {
                summary.total_income += entry.amount;
                summary.income_by_category.add(&entry.category, entry.amount);
            }
            EntryKind::Expense => {
                summary.total_expenses += entry.amount;
                summary.expense_by_category.add(&entry.category, entry.amount);
            }
        }
    }

    summary.net_profit = summary.total_income - summary.total_expenses;
    summary.profit_margin = if summary.total_income.is_positive() {
        summary.net_profit.percent_of(summary.total_income)
    } else {
        0.0
    };
    summary.record_count = entries.len();
    summary
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoryBudget {
    pub planned: MoneyCents,
    pub actual: MoneyCents,
    pub variance: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub fiscal_year: i32,
    pub total_planned: MoneyCents,
    pub total_actual: MoneyCents,
    /// `total_actual - total_planned`.
    pub budget_variance: MoneyCents,
    pub total_income: MoneyCents,
    pub total_expenses: MoneyCents,
    pub net_profit: MoneyCents,
    pub by_category: Tally<CategoryBudget>,
}

/// Planned vs actual spending for one fiscal year, next to the year's ledger
/// totals.
///
/// Budgets and entries outside `fiscal_year` are ignored, so callers may pass
/// unfiltered collections.
pub fn budget_summary(
    fiscal_year: i32,
    budgets: &[Budget],
    entries: &[FinancialEntry],
) -> BudgetSummary {
    let mut summary = BudgetSummary {
        fiscal_year,
        ..Default::default()
    };

    for budget in budgets.iter().filter(|b| b.fiscal_year == fiscal_year) {
        summary.total_planned += budget.planned_amount;
        summary.total_actual += budget.actual_amount;
        summary.by_category.accumulate(&budget.category, |slot| {
            slot.planned += budget.planned_amount;
            slot.actual += budget.actual_amount;
        });
    }
    // Variance per category is taken after accumulating, once.
    for slot in summary.by_category.values_mut() {
        slot.variance = slot.actual - slot.planned;
    }
    summary.budget_variance = summary.total_actual - summary.total_planned;

    for entry in entries.iter().filter(|e| e.date.year() == fiscal_year) {
        match entry.kind {
            EntryKind::Income => summary.total_income += entry.amount,
            EntryKind::Expense => summary.total_expenses += entry.amount,
        }
    }
    summary.net_profit = summary.total_income - summary.total_expenses;

    summary
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    fn entry(kind: EntryKind, category: &str, units: i64, date: NaiveDate) -> FinancialEntry {
        FinancialEntry {
            id: Uuid::new_v4(),
            date,
            kind,
            category: category.to_string(),
            amount: MoneyCents::from_units(units),
            description: format!("{category} entry"),
            budget_id: None,
            payment_method: None,
            reference_number: None,
            notes: None,
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn budget(category: &str, year: i32, planned: i64, actual: i64) -> Budget {
        Budget {
            id: Uuid::new_v4(),
            name: format!("{category} {year}"),
            category: category.to_string(),
            fiscal_year: year,
            planned_amount: MoneyCents::from_units(planned),
            actual_amount: MoneyCents::from_units(actual),
            start_date: None,
            end_date: None,
            description: None,
        }
    }

    #[test]
    fn summary_saturates_on_oversized_totals() {
        let mut income = entry(EntryKind::Income, "sales", 0, day(2025, 3, 1));
        income.amount = "50000000000000000".parse().unwrap();
        let mut expense = income.clone();
        expense.kind = EntryKind::Expense;

        let summary = summary(&[income.clone(), income, expense]);
        assert_eq!(summary.total_income, MoneyCents::new(i64::MAX));
        assert_eq!(summary.income_by_category.get("sales"), Some(&MoneyCents::new(i64::MAX)));
        assert!(summary.net_profit.is_positive());
        assert_eq!(summary.record_count, 3);
    }

    #[test]
    fn crop_sale_and_seed_purchase() {
        let entries = [
            entry(EntryKind::Income, "crop_sales", 2000, day(2025, 5, 1)),
            entry(EntryKind::Expense, "seeds", 500, day(2025, 3, 1)),
        ];
        let summary = summary(&entries);

        assert_eq!(summary.total_income, MoneyCents::from_units(2000));
        assert_eq!(summary.total_expenses, MoneyCents::from_units(500));
        assert_eq!(summary.net_profit, MoneyCents::from_units(1500));
        assert_eq!(summary.profit_margin, 75.0);
        assert_eq!(summary.record_count, 2);
    }

    #[test]
    fn category_breakdowns_add_up_to_totals() {
        let entries = [
            entry(EntryKind::Income, "crop_sales", 1200, day(2025, 5, 1)),
            entry(EntryKind::Income, "crop_sales", 800, day(2025, 6, 1)),
            entry(EntryKind::Income, "livestock_sales", 300, day(2025, 6, 2)),
            entry(EntryKind::Expense, "seeds", 500, day(2025, 3, 1)),
            entry(EntryKind::Expense, "fuel", 120, day(2025, 3, 4)),
            entry(EntryKind::Expense, "seeds", 80, day(2025, 3, 9)),
        ];
        let summary = summary(&entries);

        let income: MoneyCents = summary.income_by_category.values().copied().sum();
        let expenses: MoneyCents = summary.expense_by_category.values().copied().sum();
        assert_eq!(income, summary.total_income);
        assert_eq!(expenses, summary.total_expenses);
        assert_eq!(summary.total_income - summary.total_expenses, summary.net_profit);
        assert_eq!(
            summary.expense_by_category.get("seeds"),
            Some(&MoneyCents::from_units(580))
        );
    }

    #[test]
    fn expenses_only_have_zero_margin() {
        let entries = [entry(EntryKind::Expense, "feed", 90, day(2025, 1, 1))];
        let summary = summary(&entries);
        assert_eq!(summary.net_profit, MoneyCents::from_units(-90));
        assert_eq!(summary.profit_margin, 0.0);
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        assert_eq!(summary(&[]), FinancialSummary::default());

        let budgets = budget_summary(2025, &[], &[]);
        assert_eq!(budgets.total_planned, MoneyCents::ZERO);
        assert_eq!(budgets.budget_variance, MoneyCents::ZERO);
        assert!(budgets.by_category.is_empty());
    }

    #[test]
    fn category_variance_is_actual_minus_planned_after_accumulation() {
        let budgets = [
            budget("crop", 2025, 10_000, 12_500),
            budget("crop", 2025, 2_000, 1_000),
            budget("labor", 2025, 5_000, 4_000),
            budget("crop", 2024, 99_999, 0),
        ];
        let summary = budget_summary(2025, &budgets, &[]);

        assert_eq!(summary.total_planned, MoneyCents::from_units(17_000));
        assert_eq!(summary.total_actual, MoneyCents::from_units(17_500));
        assert_eq!(summary.budget_variance, MoneyCents::from_units(500));

        let crop = summary.by_category.get("crop").unwrap();
        assert_eq!(crop.planned, MoneyCents::from_units(12_000));
        assert_eq!(crop.actual, MoneyCents::from_units(13_500));
        assert_eq!(crop.variance, MoneyCents::from_units(1_500));
        let labor = summary.by_category.get("labor").unwrap();
        assert_eq!(labor.variance, MoneyCents::from_units(-1_000));
    }

    #[test]
    fn budget_summary_only_counts_entries_of_the_fiscal_year() {
        let entries = [
            entry(EntryKind::Income, "crop_sales", 2000, day(2025, 5, 1)),
            entry(EntryKind::Income, "crop_sales", 7000, day(2024, 12, 31)),
            entry(EntryKind::Expense, "seeds", 500, day(2025, 1, 1)),
        ];
        let summary = budget_summary(2025, &[], &entries);
        assert_eq!(summary.total_income, MoneyCents::from_units(2000));
        assert_eq!(summary.total_expenses, MoneyCents::from_units(500));
        assert_eq!(summary.net_profit, MoneyCents::from_units(1500));
    }
}
