//! Herd composition, sale value and health activity.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{HealthRecord, Livestock, LivestockStatus, MoneyCents};

use super::{HEALTH_WINDOW_DAYS, Tally, days_before};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LivestockSummary {
    pub total_animals: usize,
    pub species_breakdown: Tally<u64>,
    pub status_breakdown: Tally<u64>,
    pub total_purchase_value: MoneyCents,
    pub total_sale_value: MoneyCents,
    /// `total_sale_value - total_purchase_value`.
    ///
    /// Purchases of every animal are weighed against sales of the sold ones
    /// only, so a growing herd reports a loss.
    pub profit_from_sales: MoneyCents,
    pub animals_with_health_records: usize,
    pub animals_vaccinated: usize,
}

pub fn livestock_summary(animals: &[Livestock], records: &[HealthRecord]) -> LivestockSummary {
    let mut summary = LivestockSummary {
        total_animals: animals.len(),
        ..Default::default()
    };

    let with_records: HashSet<Uuid> = records.iter().map(|r| r.livestock_id).collect();
    let vaccinated: HashSet<Uuid> = records
        .iter()
        .filter(|r| r.is_vaccination())
        .map(|r| r.livestock_id)
        .collect();

    for animal in animals {
        summary.species_breakdown.count(&animal.species);
        summary.status_breakdown.count(animal.status.as_str());
        summary.total_purchase_value += animal.acquisition_cost.unwrap_or_default();
        summary.total_sale_value += animal.sale_price.unwrap_or_default();

        if with_records.contains(&animal.id) {
            summary.animals_with_health_records += 1;
        }
        if vaccinated.contains(&animal.id) {
            summary.animals_vaccinated += 1;
        }
    }

    summary.profit_from_sales = summary.total_sale_value - summary.total_purchase_value;
    summary
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HealthSummary {
    /// Records dated on or after this day are counted.
    pub window_start: NaiveDate,
    pub total_active_livestock: usize,
    pub health_records_count: usize,
    pub records_by_type: Tally<u64>,
    pub total_health_cost: MoneyCents,
    /// Active animals only.
    pub livestock_by_species: Tally<u64>,
}

/// Health activity of the last [`HEALTH_WINDOW_DAYS`] days before `today`.
pub fn health_summary(
    animals: &[Livestock],
    records: &[HealthRecord],
    today: NaiveDate,
) -> HealthSummary {
    let window_start = days_before(today, HEALTH_WINDOW_DAYS);
    let mut summary = HealthSummary {
        window_start,
        total_active_livestock: 0,
        health_records_count: 0,
        records_by_type: Tally::new(),
        total_health_cost: MoneyCents::ZERO,
        livestock_by_species: Tally::new(),
    };

    for animal in animals.iter().filter(|a| a.status == LivestockStatus::Active) {
        summary.total_active_livestock += 1;
        summary.livestock_by_species.count(&animal.species);
    }

    for record in records.iter().filter(|r| r.record_date >= window_start) {
        summary.health_records_count += 1;
        summary.records_by_type.count(&record.record_type);
        summary.total_health_cost += record.cost.unwrap_or_default();
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(tag: &str, species: &str, status: LivestockStatus) -> Livestock {
        Livestock {
            id: Uuid::new_v4(),
            tag_number: tag.to_string(),
            species: species.to_string(),
            breed: None,
            date_of_birth: None,
            gender: None,
            status,
            acquisition_date: None,
            acquisition_cost: None,
            sale_price: None,
            current_weight: None,
            notes: None,
        }
    }

    fn record(animal: &Livestock, record_type: &str, date: NaiveDate, cost: Option<i64>) -> HealthRecord {
        HealthRecord {
            id: Uuid::new_v4(),
            livestock_id: animal.id,
            record_date: date,
            record_type: record_type.to_string(),
            description: format!("{record_type} for {}", animal.tag_number),
            treatment: None,
            veterinarian: None,
            cost: cost.map(MoneyCents::from_units),
            next_followup_date: None,
            notes: None,
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn herd_breakdowns() {
        let animals = [
            animal("C-1", "cattle", LivestockStatus::Active),
            animal("C-2", "cattle", LivestockStatus::Sold),
            animal("G-1", "goat", LivestockStatus::Active),
        ];
        let summary = livestock_summary(&animals, &[]);
        assert_eq!(summary.total_animals, 3);
        assert_eq!(summary.species_breakdown.get("cattle"), Some(&2));
        assert_eq!(summary.status_breakdown.get("active"), Some(&2));
        assert_eq!(summary.status_breakdown.get("sold"), Some(&1));
        assert_eq!(summary.animals_with_health_records, 0);
    }

    #[test]
    fn profit_from_sales_weighs_all_purchases_against_sold_animals() {
        let mut kept = animal("C-1", "cattle", LivestockStatus::Active);
        kept.acquisition_cost = Some(MoneyCents::from_units(800));
        let mut sold = animal("C-2", "cattle", LivestockStatus::Sold);
        sold.acquisition_cost = Some(MoneyCents::from_units(700));
        sold.sale_price = Some(MoneyCents::from_units(1_200));

        let summary = livestock_summary(&[kept, sold], &[]);
        assert_eq!(summary.total_purchase_value, MoneyCents::from_units(1_500));
        assert_eq!(summary.total_sale_value, MoneyCents::from_units(1_200));
        // The kept animal's purchase turns a 500 gain on the sale into a loss.
        assert_eq!(summary.profit_from_sales, MoneyCents::from_units(-300));
    }

    #[test]
    fn animals_are_counted_once_per_record_kind() {
        let a = animal("C-1", "cattle", LivestockStatus::Active);
        let b = animal("C-2", "cattle", LivestockStatus::Active);
        let c = animal("C-3", "cattle", LivestockStatus::Active);
        let records = [
            record(&a, "Vaccination", day(2025, 1, 1), None),
            record(&a, "vaccination", day(2025, 2, 1), None),
            record(&b, "checkup", day(2025, 2, 1), None),
        ];
        let summary = livestock_summary(&[a, b, c], &records);
        assert_eq!(summary.animals_with_health_records, 2);
        assert_eq!(summary.animals_vaccinated, 1);
    }

    #[test]
    fn health_summary_counts_the_last_ninety_days() {
        let today = day(2025, 6, 30);
        let cow = animal("C-1", "cattle", LivestockStatus::Active);
        let goat = animal("G-1", "goat", LivestockStatus::Quarantine);
        let records = [
            record(&cow, "vaccination", day(2025, 6, 1), Some(40)),
            record(&cow, "treatment", day(2025, 4, 1), None),
            record(&goat, "treatment", day(2025, 1, 1), Some(999)),
        ];
        let summary = health_summary(&[cow, goat], &records, today);

        assert_eq!(summary.window_start, day(2025, 4, 1));
        assert_eq!(summary.total_active_livestock, 1);
        assert_eq!(summary.health_records_count, 2);
        assert_eq!(summary.records_by_type.get("treatment"), Some(&1));
        assert_eq!(summary.total_health_cost, MoneyCents::from_units(40));
        assert_eq!(summary.livestock_by_species.get("goat"), None);
    }

    #[test]
    fn empty_herd() {
        assert_eq!(livestock_summary(&[], &[]), LivestockSummary::default());
        let health = health_summary(&[], &[], day(2025, 6, 30));
        assert_eq!(health.health_records_count, 0);
        assert!(health.records_by_type.is_empty());
    }
}
