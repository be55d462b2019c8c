//! Comparison of normalized costs against regional baselines.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::analysis::{Band, Comparison, ComparisonSet, NormalizedCosts};
use crate::models::config::BandConfig;
use crate::models::region::BaselineCosts;

/// Classifies cost deviations into severity bands.
#[derive(Debug, Clone)]
pub struct Comparator {
    bands: BandConfig,
}

impl Comparator {
    pub fn new(bands: BandConfig) -> Self {
        Self { bands }
    }

    /// Compare every category plus the aggregate total.
    pub fn compare_all(
        &self,
        normalized: &NormalizedCosts,
        baselines: &BaselineCosts,
    ) -> ComparisonSet {
        ComparisonSet {
            heating: self.compare(normalized.heating, baselines.heating),
            water: self.compare(normalized.water, baselines.water),
            waste: self.compare(normalized.waste, baselines.waste),
            maintenance: self.compare(normalized.maintenance, baselines.maintenance),
            total: self.compare(normalized.total, baselines.total()),
        }
    }

    /// Compare one normalized amount against its baseline.
    pub fn compare(&self, user_amount: Decimal, baseline_amount: Decimal) -> Comparison {
        let deviation_pct = deviation_pct(user_amount, baseline_amount);
        let band = self.band_for(deviation_pct);

        Comparison {
            user_amount,
            baseline_amount,
            deviation_pct,
            band,
            message: message_for(band, deviation_pct),
        }
    }

    /// Band for a deviation. The thresholds partition the real line, so
    /// every deviation lands in exactly one band; a deviation exactly on
    /// a threshold belongs to the band above it.
    fn band_for(&self, deviation_pct: f64) -> Band {
        if deviation_pct < self.bands.low_pct {
            Band::Low
        } else if deviation_pct < self.bands.high_pct {
            Band::Average
        } else if deviation_pct < self.bands.very_high_pct {
            Band::High
        } else {
            Band::VeryHigh
        }
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(BandConfig::default())
    }
}

/// Percentage deviation rounded to one decimal place. A zero baseline
/// yields zero deviation rather than a division error; bundled baselines
/// are never zero, but configs are user-supplied.
fn deviation_pct(user: Decimal, baseline: Decimal) -> f64 {
    if baseline.is_zero() {
        return 0.0;
    }
    let pct = ((user - baseline) / baseline * Decimal::from(100))
        .to_f64()
        .unwrap_or(0.0);
    (pct * 10.0).round() / 10.0
}

fn message_for(band: Band, deviation_pct: f64) -> String {
    match band {
        Band::Low => format!(
            "{:.1}% unter dem Durchschnitt - sehr gut!",
            deviation_pct.abs()
        ),
        Band::Average => format!("Im normalen Bereich ({deviation_pct:+.1}% vom Durchschnitt)"),
        Band::High => format!("{deviation_pct:.1}% über dem Durchschnitt - erhöht"),
        Band::VeryHigh => {
            format!("{deviation_pct:.1}% über dem Durchschnitt - deutlich zu hoch!")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_slightly_below_baseline_is_average() {
        // 1.50 vs 1.52 baseline: -1.3%, within the normal range
        let comparison = Comparator::default().compare(dec("1.50"), dec("1.52"));
        assert_eq!(comparison.deviation_pct, -1.3);
        assert_eq!(comparison.band, Band::Average);
    }

    #[test]
    fn test_double_baseline_is_very_high() {
        let comparison = Comparator::default().compare(dec("3.00"), dec("1.52"));
        assert_eq!(comparison.deviation_pct, 97.4);
        assert_eq!(comparison.band, Band::VeryHigh);
        assert!(comparison.message.contains("deutlich zu hoch"));
    }

    #[test]
    fn test_band_boundaries_belong_to_upper_band() {
        let comparator = Comparator::default();
        assert_eq!(comparator.band_for(-15.1), Band::Low);
        assert_eq!(comparator.band_for(-15.0), Band::Average);
        assert_eq!(comparator.band_for(14.9), Band::Average);
        assert_eq!(comparator.band_for(15.0), Band::High);
        assert_eq!(comparator.band_for(49.9), Band::High);
        assert_eq!(comparator.band_for(50.0), Band::VeryHigh);
    }

    #[test]
    fn test_zero_baseline_yields_zero_deviation() {
        let comparison = Comparator::default().compare(dec("0.50"), Decimal::ZERO);
        assert_eq!(comparison.deviation_pct, 0.0);
        assert_eq!(comparison.band, Band::Average);
    }

    #[test]
    fn test_low_band_message() {
        let comparison = Comparator::default().compare(dec("1.00"), dec("1.52"));
        assert_eq!(comparison.band, Band::Low);
        assert!(comparison.message.contains("unter dem Durchschnitt"));
    }
}
