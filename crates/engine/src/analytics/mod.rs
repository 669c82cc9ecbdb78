//! Aggregations over farm records.
//!
//! Every function in this module is pure: it reads a slice of records and
//! returns a summary struct. Nothing here touches the database; the
//! [`Engine`](crate::Engine) loads a [`FarmSnapshot`] and hands it over.
//!
//! Ratios whose denominator is zero (profit margin, yield per hectare,
//! average hourly rate, variance percentage) are reported as `0`, never as an
//! error.
//!
//! "Today" is always an explicit parameter so the 30 and 90 day windows are
//! reproducible.

use std::collections::{BTreeMap, btree_map};
use std::ops::AddAssign;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::{Budget, CropCycle, FinancialEntry, HealthRecord, LaborEntry, Livestock};

pub mod crops;
pub mod financial;
pub mod labor;
pub mod livestock;
pub mod report;

pub use crops::{CropPerformance, CropSummary};
pub use financial::{BudgetSummary, CategoryBudget, FinancialSummary};
pub use labor::{ActivityLabor, LaborStatistics, LaborSummary, WorkerLabor};
pub use livestock::{HealthSummary, LivestockSummary};
pub use report::{
    Dashboard, FarmReport, LaborUtilization, LandUtilization, ProfitabilityAnalysis, ReportKind,
    ResourceUtilization,
};

/// Health records newer than this many days count as recent.
pub const HEALTH_WINDOW_DAYS: u64 = 90;
/// Default labor statistics window when no range is given.
pub const LABOR_WINDOW_DAYS: u64 = 30;

/// Everything the report composer reads, loaded at one point in time.
#[derive(Clone, Debug, Default)]
pub struct FarmSnapshot {
    pub entries: Vec<FinancialEntry>,
    pub budgets: Vec<Budget>,
    pub cycles: Vec<CropCycle>,
    pub livestock: Vec<Livestock>,
    pub health_records: Vec<HealthRecord>,
    pub labor: Vec<LaborEntry>,
    pub active_workers: u64,
}

/// Inclusive date range `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `[today - days, today]`.
    pub fn last_days(today: NaiveDate, days: u64) -> Self {
        Self {
            start: days_before(today, days),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// `today - days`, saturating at the earliest representable date.
pub(crate) fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Keyed accumulator used for every "group by label" breakdown.
///
/// Keys are kept sorted so serialized breakdowns are stable.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tally<V>(BTreeMap<String, V>);

impl<V> Default for Tally<V> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<V> Tally<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate into the slot for `key`, inserting `V::default()` first when
    /// the key is new.
    pub fn accumulate(&mut self, key: &str, update: impl FnOnce(&mut V))
    where
        V: Default,
    {
        update(self.0.entry(key.to_string()).or_default());
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, V> {
        self.0.iter()
    }

    pub fn values(&self) -> btree_map::Values<'_, String, V> {
        self.0.values()
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, String, V> {
        self.0.values_mut()
    }
}

impl<V: AddAssign + Default> Tally<V> {
    /// `tally[key] += amount`.
    pub fn add(&mut self, key: &str, amount: V) {
        self.accumulate(key, |slot| *slot += amount);
    }
}

impl Tally<u64> {
    /// `tally[key] += 1`.
    pub fn count(&mut self, key: &str) {
        self.add(key, 1);
    }
}

impl<'a, V> IntoIterator for &'a Tally<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = btree_map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
