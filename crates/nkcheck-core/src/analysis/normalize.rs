//! Cost normalization to €/m²/month.

use rust_decimal::Decimal;

use crate::models::analysis::NormalizedCosts;
use crate::models::bill::BillRecord;

/// Normalize a bill's category totals to €/m²/month.
///
/// Each category is divided by floor area and period length in months,
/// rounded to cents. The total is the sum of the four comparable
/// categories after rounding, so it always equals what a reader gets by
/// adding up the displayed figures. Electricity and "other" are excluded:
/// the baseline tables carry no figures for them.
pub fn normalize(record: &BillRecord) -> NormalizedCosts {
    let months = record.period.months();
    let divisor = record.floor_area_sqm * Decimal::from(months);

    let per_unit = |amount: Decimal| (amount / divisor).round_dp(2);

    let heating = per_unit(record.costs.heating);
    let water = per_unit(record.costs.water);
    let waste = per_unit(record.costs.waste);
    let maintenance = per_unit(record.costs.maintenance);

    NormalizedCosts {
        heating,
        water,
        waste,
        maintenance,
        total: heating + water + waste + maintenance,
        months_in_period: months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bill::{BillingPeriod, CostBreakdown};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(costs: CostBreakdown) -> BillRecord {
        let period = BillingPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .unwrap();
        BillRecord::new("10115".to_string(), Decimal::from(75), period, costs, false).unwrap()
    }

    #[test]
    fn test_normalize_annual_bill() {
        // 1350 € heating / 75 m² / 12 months = 1.50 €/m²/month
        let normalized = normalize(&record(CostBreakdown {
            heating: Decimal::from(1350),
            water: Decimal::from(540),
            ..Default::default()
        }));

        assert_eq!(normalized.months_in_period, 12);
        assert_eq!(normalized.heating, Decimal::from_str("1.50").unwrap());
        assert_eq!(normalized.water, Decimal::from_str("0.60").unwrap());
        assert_eq!(normalized.waste, Decimal::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_categories() {
        let normalized = normalize(&record(CostBreakdown {
            heating: Decimal::from(1350),
            water: Decimal::from(541),
            waste: Decimal::from(97),
            maintenance: Decimal::from(1009),
            ..Default::default()
        }));

        let sum =
            normalized.heating + normalized.water + normalized.waste + normalized.maintenance;
        assert_eq!(normalized.total, sum);
    }

    #[test]
    fn test_electricity_excluded_from_total() {
        let normalized = normalize(&record(CostBreakdown {
            heating: Decimal::from(900),
            electricity: Decimal::from(600),
            ..Default::default()
        }));

        assert_eq!(normalized.total, normalized.heating);
    }
}
