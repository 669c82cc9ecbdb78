//! Crop cycle totals and per-crop yield performance.

use serde::Serialize;

use crate::{CropCycle, MoneyCents};

use super::Tally;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CropSummary {
    pub total_crops: usize,
    /// Hectares.
    pub total_area: f64,
    pub status_breakdown: Tally<u64>,
    pub total_expenses: MoneyCents,
    pub total_revenue: MoneyCents,
    pub total_profit: MoneyCents,
    /// Mean of per-cycle `yield / area` over harvested cycles.
    pub avg_yield_per_area: f64,
    pub harvested_crops: usize,
}

pub fn crop_summary(cycles: &[CropCycle]) -> CropSummary {
    let mut summary = CropSummary {
        total_crops: cycles.len(),
        ..Default::default()
    };
    let mut yield_sum = 0.0;
    let mut yield_samples = 0_u32;

    for cycle in cycles {
        summary.total_area += cycle.area_hectares;
        summary.status_breakdown.count(cycle.status.as_str());
        summary.total_expenses += cycle.expenses;
        summary.total_revenue += cycle.revenue;
        summary.total_profit += cycle.profit();

        if !cycle.is_harvested_with_yield() {
            continue;
        }
        summary.harvested_crops += 1;
        // Cycles without a positive area have no defined yield per hectare.
        if let Some(per_area) = cycle.yield_per_area() {
            yield_sum += per_area;
            yield_samples += 1;
        }
    }

    if yield_samples > 0 {
        summary.avg_yield_per_area = yield_sum / f64::from(yield_samples);
    }
    summary
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CropPerformance {
    pub crop_name: String,
    pub cycle_count: u64,
    pub total_yield: f64,
    pub total_area: f64,
    /// `total_yield / total_area`, `0` without area.
    pub avg_yield_per_area: f64,
}

/// Harvested cycles grouped by crop name, sorted by name.
pub fn performance_by_crop(cycles: &[CropCycle]) -> Vec<CropPerformance> {
    let mut groups: Tally<CropPerformance> = Tally::new();

    for cycle in cycles {
        let Some(amount) = cycle.yield_amount.filter(|_| cycle.is_harvested_with_yield()) else {
            continue;
        };
        groups.accumulate(&cycle.crop_name, |group| {
            group.cycle_count += 1;
            group.total_yield += amount;
            group.total_area += cycle.area_hectares;
        });
    }

    groups
        .iter()
        .map(|(name, group)| CropPerformance {
            crop_name: name.clone(),
            avg_yield_per_area: if group.total_area > 0.0 {
                group.total_yield / group.total_area
            } else {
                0.0
            },
            ..group.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::CycleStatus;

    fn cycle(crop: &str, status: CycleStatus, area: f64, yield_amount: Option<f64>) -> CropCycle {
        CropCycle {
            id: Uuid::new_v4(),
            crop_id: Uuid::nil(),
            crop_name: crop.to_string(),
            field_location: None,
            area_hectares: area,
            planting_date: None,
            expected_harvest_date: None,
            actual_harvest_date: None,
            status,
            yield_amount,
            yield_unit: Some("kg".to_string()),
            expenses: MoneyCents::ZERO,
            revenue: MoneyCents::ZERO,
            notes: None,
        }
    }

    #[test]
    fn single_harvest_yield_per_hectare() {
        let cycles = [cycle("Maize", CycleStatus::Harvested, 10.0, Some(500.0))];
        let summary = crop_summary(&cycles);
        assert_eq!(summary.avg_yield_per_area, 50.0);
        assert_eq!(summary.harvested_crops, 1);
        assert_eq!(summary.total_area, 10.0);
    }

    #[test]
    fn equal_areas_average_to_mean_yield_over_area() {
        let cycles = [
            cycle("Maize", CycleStatus::Harvested, 4.0, Some(100.0)),
            cycle("Maize", CycleStatus::Harvested, 4.0, Some(200.0)),
            cycle("Beans", CycleStatus::Harvested, 4.0, Some(300.0)),
        ];
        let summary = crop_summary(&cycles);
        assert_eq!(summary.avg_yield_per_area, 200.0 / 4.0);
    }

    #[test]
    fn zero_area_and_unharvested_cycles_do_not_skew_yield() {
        let cycles = [
            cycle("Maize", CycleStatus::Harvested, 10.0, Some(500.0)),
            cycle("Maize", CycleStatus::Harvested, 0.0, Some(900.0)),
            cycle("Maize", CycleStatus::Growing, 5.0, Some(10.0)),
            cycle("Maize", CycleStatus::Harvested, 5.0, None),
        ];
        let summary = crop_summary(&cycles);
        assert_eq!(summary.avg_yield_per_area, 50.0);
        assert_eq!(summary.harvested_crops, 2);
        assert_eq!(summary.total_crops, 4);
        assert_eq!(summary.status_breakdown.get("harvested"), Some(&3));
        assert_eq!(summary.status_breakdown.get("growing"), Some(&1));
    }

    #[test]
    fn profit_is_revenue_minus_expenses() {
        let mut sold = cycle("Wheat", CycleStatus::Harvested, 2.0, Some(8.0));
        sold.expenses = MoneyCents::from_units(300);
        sold.revenue = MoneyCents::from_units(1_000);
        let mut lost = cycle("Wheat", CycleStatus::Failed, 1.0, None);
        lost.expenses = MoneyCents::from_units(200);
        assert_eq!(lost.profit(), MoneyCents::from_units(-200));

        let summary = crop_summary(&[sold, lost]);
        assert_eq!(summary.total_expenses, MoneyCents::from_units(500));
        assert_eq!(summary.total_revenue, MoneyCents::from_units(1_000));
        assert_eq!(summary.total_profit, MoneyCents::from_units(500));
    }

    #[test]
    fn performance_groups_harvests_by_crop() {
        let cycles = [
            cycle("Wheat", CycleStatus::Harvested, 2.0, Some(8.0)),
            cycle("Maize", CycleStatus::Harvested, 10.0, Some(500.0)),
            cycle("Wheat", CycleStatus::Harvested, 3.0, Some(12.0)),
            cycle("Wheat", CycleStatus::Planted, 3.0, None),
            cycle("Sorghum", CycleStatus::Harvested, 0.0, Some(7.0)),
        ];
        let performance = performance_by_crop(&cycles);
        let names: Vec<&str> = performance.iter().map(|p| p.crop_name.as_str()).collect();
        assert_eq!(names, ["Maize", "Sorghum", "Wheat"]);

        let wheat = &performance[2];
        assert_eq!(wheat.cycle_count, 2);
        assert_eq!(wheat.total_yield, 20.0);
        assert_eq!(wheat.total_area, 5.0);
        assert_eq!(wheat.avg_yield_per_area, 4.0);
        assert_eq!(performance[1].avg_yield_per_area, 0.0);
    }

    #[test]
    fn no_cycles_no_numbers() {
        assert_eq!(crop_summary(&[]), CropSummary::default());
        assert!(performance_by_crop(&[]).is_empty());
    }
}
