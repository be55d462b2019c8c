//! Annual savings estimation with category-specific recommendations.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::analysis::{NormalizedCosts, SavingsEstimate};
use crate::models::config::SavingsConfig;
use crate::models::region::BaselineCosts;

/// Projects annual savings from excess costs over baseline.
#[derive(Debug, Clone)]
pub struct SavingsEstimator {
    config: SavingsConfig,
}

impl SavingsEstimator {
    pub fn new(config: SavingsConfig) -> Self {
        Self { config }
    }

    /// Estimate annual savings for all triggered categories.
    ///
    /// A category contributes only when the user's normalized cost exceeds
    /// its trigger multiple of the baseline; being merely above baseline is
    /// normal spread, not savings potential. The excess is annualized over
    /// the full floor area: `(user − baseline) × area × 12`.
    pub fn estimate(
        &self,
        normalized: &NormalizedCosts,
        baselines: &BaselineCosts,
        floor_area_sqm: Decimal,
    ) -> SavingsEstimate {
        let mut potential_annual = Decimal::ZERO;
        let mut recommendations = Vec::new();

        let annual_excess = |user: Decimal, baseline: Decimal| {
            ((user - baseline) * floor_area_sqm * Decimal::from(12)).round_dp(2)
        };

        if normalized.heating > baselines.heating * self.config.heating_trigger {
            let excess = annual_excess(normalized.heating, baselines.heating);
            potential_annual += excess;
            recommendations.push(format!(
                "Heizkosten prüfen: Hydraulischer Abgleich und Thermostat-Optimierung \
                 können bis zu {excess:.0} € pro Jahr sparen."
            ));
        }

        if normalized.water > baselines.water * self.config.water_trigger {
            let excess = annual_excess(normalized.water, baselines.water);
            potential_annual += excess;
            recommendations.push(format!(
                "Wasserkosten senken: Sparduschköpfe und Durchflussbegrenzer können \
                 bis zu {excess:.0} € pro Jahr sparen."
            ));
        }

        if normalized.maintenance > baselines.maintenance * self.config.maintenance_trigger {
            let excess = annual_excess(normalized.maintenance, baselines.maintenance);
            potential_annual += excess;
            recommendations.push(format!(
                "Hausmeister- und Wartungskosten sind auffällig hoch ({excess:.0} € \
                 über dem Üblichen pro Jahr) - mit den Vorjahren vergleichen."
            ));
        }

        if potential_annual > self.config.landlord_advice_eur {
            recommendations.push(
                "Sparpotenzial über 200 €/Jahr: Abrechnung vom Vermieter detailliert \
                 aufschlüsseln lassen."
                    .to_string(),
            );
        }
        if potential_annual > self.config.tenant_association_eur {
            recommendations.push(
                "Bei über 500 €/Jahr Sparpotenzial lohnt sich eine Prüfung durch \
                 den Mieterverein."
                    .to_string(),
            );
        }

        debug!(%potential_annual, count = recommendations.len(), "savings estimated");

        SavingsEstimate {
            potential_annual,
            recommendations,
        }
    }
}

impl Default for SavingsEstimator {
    fn default() -> Self {
        Self::new(SavingsConfig::default())
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

    fn baselines() -> BaselineCosts {
        BaselineCosts {
            heating: dec("1.52"),
            water: dec("0.65"),
            waste: dec("0.35"),
            maintenance: dec("1.20"),
        }
    }

    fn normalized(heating: &str, water: &str, maintenance: &str) -> NormalizedCosts {
        NormalizedCosts {
            heating: dec(heating),
            water: dec(water),
            waste: dec("0.35"),
            maintenance: dec(maintenance),
            total: dec(heating) + dec(water) + dec("0.35") + dec(maintenance),
            months_in_period: 12,
        }
    }

    #[test]
    fn test_no_savings_when_within_triggers() {
        // 1.60 is above the 1.52 baseline but below the 1.2x trigger
        let estimate = SavingsEstimator::default().estimate(
            &normalized("1.60", "0.65", "1.20"),
            &baselines(),
            Decimal::from(75),
        );

        assert_eq!(estimate.potential_annual, Decimal::ZERO);
        assert!(estimate.recommendations.is_empty());
    }

    #[test]
    fn test_doubled_heating_triggers_savings() {
        // (3.00 - 1.52) * 75 m² * 12 = 1332 €/year
        let estimate = SavingsEstimator::default().estimate(
            &normalized("3.00", "0.65", "1.20"),
            &baselines(),
            Decimal::from(75),
        );

        assert_eq!(estimate.potential_annual, dec("1332.00"));
        // heating advice plus both generic tiers
        assert_eq!(estimate.recommendations.len(), 3);
        assert!(estimate.recommendations[0].contains("Heizkosten"));
        assert!(estimate.recommendations[2].contains("Mieterverein"));
    }

    #[test]
    fn test_landlord_tier_without_tenant_association() {
        // (2.00 - 1.52) * 75 * 12 = 432 €/year: above 200, below 500
        let estimate = SavingsEstimator::default().estimate(
            &normalized("2.00", "0.65", "1.20"),
            &baselines(),
            Decimal::from(75),
        );

        assert_eq!(estimate.potential_annual, dec("432.00"));
        assert_eq!(estimate.recommendations.len(), 2);
        assert!(estimate.recommendations[1].contains("Vermieter"));
    }

    #[test]
    fn test_water_and_maintenance_triggers() {
        // water 0.90 > 0.65 * 1.3, maintenance 1.90 > 1.20 * 1.5
        let estimate = SavingsEstimator::default().estimate(
            &normalized("1.52", "0.90", "1.90"),
            &baselines(),
            Decimal::from(50),
        );

        // (0.25 + 0.70) * 50 * 12 = 570
        assert_eq!(estimate.potential_annual, dec("570.00"));
        assert!(estimate.recommendations[0].contains("Wasserkosten"));
        assert!(estimate.recommendations[1].contains("Wartungskosten"));
    }
}
