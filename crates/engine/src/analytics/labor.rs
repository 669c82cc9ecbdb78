//! Hours and labor cost, per worker and per activity.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{LaborEntry, MoneyCents};

use super::{DateWindow, Tally};

/// Label used for work logs without an activity type.
pub const UNSPECIFIED_ACTIVITY: &str = "unspecified";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WorkerLabor {
    pub hours: f64,
    pub cost: MoneyCents,
    pub task_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ActivityLabor {
    pub hours: f64,
    pub cost: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LaborSummary {
    pub total_records: usize,
    pub total_hours: f64,
    /// Sum of each entry's `hours × rate`, rounded to the cent once.
    pub total_cost: MoneyCents,
    /// `total_cost / total_hours`, `0` without hours.
    pub avg_hourly_rate: MoneyCents,
    pub worker_count: usize,
    pub worker_breakdown: Tally<WorkerLabor>,
    pub activity_breakdown: Tally<ActivityLabor>,
}

/// Costs are summed unrounded and rounded once per total, so many fractional
/// entries do not drift from `sum(hours × rate)`.
pub fn labor_summary(entries: &[LaborEntry]) -> LaborSummary {
    let mut summary = LaborSummary {
        total_records: entries.len(),
        ..Default::default()
    };
    let mut workers = HashSet::<Uuid>::new();
    let mut total_cents = 0.0;
    let mut worker_cents = Tally::<f64>::new();
    let mut activity_cents = Tally::<f64>::new();

    for entry in entries {
        let cents = entry.cost_in_cents();
        let activity = activity_label(entry);
        summary.total_hours += entry.hours_worked;
        total_cents += cents;
        workers.insert(entry.worker_id);

        worker_cents.add(&entry.worker_name, cents);
        summary.worker_breakdown.accumulate(&entry.worker_name, |slot| {
            slot.hours += entry.hours_worked;
            slot.task_count += 1;
        });
        activity_cents.add(activity, cents);
        summary
            .activity_breakdown
            .accumulate(activity, |slot| slot.hours += entry.hours_worked);
    }

    for (name, cents) in &worker_cents {
        summary
            .worker_breakdown
            .accumulate(name, |slot| slot.cost = MoneyCents::round_cents(*cents));
    }
    for (activity, cents) in &activity_cents {
        summary
            .activity_breakdown
            .accumulate(activity, |slot| slot.cost = MoneyCents::round_cents(*cents));
    }

    summary.total_cost = MoneyCents::round_cents(total_cents);
    summary.avg_hourly_rate = summary.total_cost.per(summary.total_hours);
    summary.worker_count = workers.len();
    summary
}

fn activity_label(entry: &LaborEntry) -> &str {
    entry
        .activity_type
        .as_deref()
        .map(str::trim)
        .filter(|activity| !activity.is_empty())
        .unwrap_or(UNSPECIFIED_ACTIVITY)
}

/// [`LaborSummary`] over a date window, next to the active workforce.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LaborStatistics {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active_workers: u64,
    #[serde(flatten)]
    pub summary: LaborSummary,
}

/// Summarizes the entries dated inside `window`; the rest are ignored.
pub fn labor_statistics(
    window: DateWindow,
    entries: &[LaborEntry],
    active_workers: u64,
) -> LaborStatistics {
    let in_window: Vec<LaborEntry> = entries
        .iter()
        .filter(|entry| window.contains(entry.work_date))
        .cloned()
        .collect();

    LaborStatistics {
        start_date: window.start,
        end_date: window.end,
        active_workers,
        summary: labor_summary(&in_window),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(worker: &str, rate: Option<i64>, hours: f64, activity: Option<&str>) -> LaborEntry {
        LaborEntry {
            id: Uuid::new_v4(),
            worker_id: Uuid::from_u128(u128::from(worker.as_bytes()[0])),
            worker_name: worker.to_string(),
            hourly_rate: rate.map(MoneyCents::from_units),
            work_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            hours_worked: hours,
            activity_type: activity.map(str::to_string),
            location: None,
            description: None,
            notes: None,
        }
    }

    #[test]
    fn cost_is_summed_per_entry_not_from_average_rate() {
        let entries = [
            entry("Ana Lima", Some(15), 8.0, Some("harvesting")),
            entry("Joe Park", Some(30), 2.0, Some("maintenance")),
        ];
        let summary = labor_summary(&entries);

        assert_eq!(summary.total_hours, 10.0);
        assert_eq!(summary.total_cost, MoneyCents::from_units(180));
        assert_eq!(summary.avg_hourly_rate, MoneyCents::from_units(18));
        assert_eq!(summary.worker_count, 2);
    }

    #[test]
    fn fractional_entries_round_once() {
        let entries = [
            entry("Ana Lima", Some(1), 0.333, Some("weeding")),
            entry("Ana Lima", Some(1), 0.333, Some("weeding")),
            entry("Ana Lima", Some(1), 0.333, Some("weeding")),
        ];
        let summary = labor_summary(&entries);

        assert_eq!(entries[0].total_cost(), MoneyCents::new(33));
        assert_eq!(summary.total_cost, MoneyCents::from_units(1));
        assert_eq!(
            summary.worker_breakdown.get("Ana Lima").unwrap().cost,
            MoneyCents::from_units(1)
        );
        assert_eq!(
            summary.activity_breakdown.get("weeding").unwrap().cost,
            MoneyCents::from_units(1)
        );
    }

    #[test]
    fn breakdowns_by_worker_and_activity() {
        let entries = [
            entry("Ana Lima", Some(15), 8.0, Some("harvesting")),
            entry("Ana Lima", Some(15), 2.0, Some("  ")),
            entry("Joe Park", None, 4.0, None),
        ];
        let summary = labor_summary(&entries);

        let ana = summary.worker_breakdown.get("Ana Lima").unwrap();
        assert_eq!(ana.task_count, 2);
        assert_eq!(ana.hours, 10.0);
        assert_eq!(ana.cost, MoneyCents::from_units(150));

        let joe = summary.worker_breakdown.get("Joe Park").unwrap();
        assert_eq!(joe.cost, MoneyCents::ZERO);

        let unspecified = summary.activity_breakdown.get(UNSPECIFIED_ACTIVITY).unwrap();
        assert_eq!(unspecified.hours, 6.0);
        assert_eq!(unspecified.cost, MoneyCents::from_units(30));
        assert_eq!(summary.activity_breakdown.len(), 2);
    }

    #[test]
    fn statistics_only_see_entries_in_window() {
        let mut old = entry("Ana Lima", Some(15), 8.0, None);
        old.work_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let recent = entry("Ana Lima", Some(15), 2.0, None);
        let window = DateWindow::last_days(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(), 30);

        let stats = labor_statistics(window, &[old, recent], 3);
        assert_eq!(stats.start_date, window.start);
        assert_eq!(stats.active_workers, 3);
        assert_eq!(stats.summary.total_records, 1);
        assert_eq!(stats.summary.total_cost, MoneyCents::from_units(30));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_hours"], 2.0);
        assert_eq!(json["start_date"], "2025-05-31");
    }

    #[test]
    fn no_hours_no_rate() {
        let summary = labor_summary(&[]);
        assert_eq!(summary, LaborSummary::default());
        assert_eq!(summary.avg_hourly_rate, MoneyCents::ZERO);
    }
}
