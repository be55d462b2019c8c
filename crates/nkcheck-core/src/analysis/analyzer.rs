//! Pipeline entry point tying resolution, normalization, comparison,
//! savings, and confidence together.

use tracing::{debug, info};

use super::compare::Comparator;
use super::confidence::ConfidenceScorer;
use super::normalize::normalize;
use super::savings::SavingsEstimator;
use crate::energy::EnergyLookup;
use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::bill::BillRecord;
use crate::models::config::AnalyzerConfig;
use crate::region::LocationResolver;

/// Analyzes validated bills against regional baselines.
///
/// Resolver and energy lookup are injected so callers pick the online or
/// offline variants; the analysis itself is deterministic given their
/// answers. Analyzing the same record twice yields the same result.
pub struct BillAnalyzer<R, E> {
    resolver: R,
    energy: Option<E>,
    comparator: Comparator,
    savings: SavingsEstimator,
    confidence: ConfidenceScorer,
}

impl<R, E> BillAnalyzer<R, E>
where
    R: LocationResolver,
    E: EnergyLookup,
{
    /// Build an analyzer without energy price context.
    pub fn new(resolver: R, config: &AnalyzerConfig) -> Self {
        Self {
            resolver,
            energy: None,
            comparator: Comparator::new(config.bands.clone()),
            savings: SavingsEstimator::new(config.savings.clone()),
            confidence: ConfidenceScorer::new(config.confidence.clone()),
        }
    }

    /// Attach an energy price lookup; its snapshot is informational and
    /// never fails the analysis.
    pub fn with_energy(mut self, lookup: E) -> Self {
        self.energy = Some(lookup);
        self
    }

    /// Run the full analysis for one bill.
    ///
    /// Location resolution is the only fallible step: without a baseline
    /// there is nothing to compare against.
    pub async fn analyze(&self, record: &BillRecord) -> Result<AnalysisResult> {
        info!(plz = %record.postal_code, "analyzing bill");

        let (profile, energy) = match &self.energy {
            Some(lookup) => {
                let (profile, snapshot) = tokio::join!(
                    self.resolver.resolve(&record.postal_code),
                    lookup.snapshot()
                );
                (profile?, Some(snapshot))
            }
            None => (self.resolver.resolve(&record.postal_code).await?, None),
        };

        let normalized = normalize(record);
        debug!(total = %normalized.total, months = normalized.months_in_period, "costs normalized");

        let comparisons = self.comparator.compare_all(&normalized, &profile.baseline_costs);
        let savings = self.savings.estimate(
            &normalized,
            &profile.baseline_costs,
            record.floor_area_sqm,
        );
        let confidence = self.confidence.score(&profile, record);

        info!(
            band = ?comparisons.total.band,
            savings = %savings.potential_annual,
            confidence,
            "analysis complete"
        );

        Ok(AnalysisResult {
            normalized,
            baselines: profile.baseline_costs,
            comparisons,
            savings,
            profile,
            energy,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::StaticEnergyLookup;
    use crate::error::{LocationError, NkError};
    use crate::models::analysis::Band;
    use crate::models::bill::{BillingPeriod, CostBreakdown};
    use crate::region::StaticResolver;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn record(plz: &str, heating: i64) -> BillRecord {
        let period = BillingPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .unwrap();
        BillRecord::new(
            plz.to_string(),
            Decimal::from(75),
            period,
            CostBreakdown {
                heating: Decimal::from(heating),
                water: Decimal::from(540),
                waste: Decimal::from(300),
                maintenance: Decimal::from(1000),
                ..Default::default()
            },
            false,
        )
        .unwrap()
    }

    fn analyzer() -> BillAnalyzer<StaticResolver, StaticEnergyLookup> {
        BillAnalyzer::new(StaticResolver::new(), &AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn test_average_bill_in_berlin() {
        // 1350 € / 75 m² / 12 months = 1.50 vs 1.52 baseline
        let result = analyzer().analyze(&record("10115", 1350)).await.unwrap();

        assert_eq!(
            result.normalized.heating,
            Decimal::from_str("1.50").unwrap()
        );
        assert_eq!(result.comparisons.heating.band, Band::Average);
        assert_eq!(result.profile.city, "Berlin");
        assert_eq!(result.confidence, 100);
        assert!(result.energy.is_none());
    }

    #[tokio::test]
    async fn test_doubled_heating_flags_savings() {
        let result = analyzer().analyze(&record("10115", 2700)).await.unwrap();

        assert_eq!(
            result.normalized.heating,
            Decimal::from_str("3.00").unwrap()
        );
        assert_eq!(result.comparisons.heating.band, Band::VeryHigh);
        assert_eq!(
            result.savings.potential_annual,
            Decimal::from_str("1332.00").unwrap()
        );
    }

    #[tokio::test]
    async fn test_energy_snapshot_attached_when_configured() {
        let config = AnalyzerConfig::default();
        let analyzer = BillAnalyzer::new(StaticResolver::new(), &config)
            .with_energy(StaticEnergyLookup::from_config(&config.energy));

        let result = analyzer.analyze(&record("10115", 1350)).await.unwrap();
        let energy = result.energy.unwrap();
        assert_eq!(energy.electricity_price_eur_kwh, Decimal::new(397, 3));
    }

    #[tokio::test]
    async fn test_unknown_plz_fails_analysis() {
        let err = analyzer().analyze(&record("99998", 1350)).await.unwrap_err();
        assert!(matches!(
            err,
            NkError::Location(LocationError::UnknownPostalCode(_))
        ));
    }

    #[tokio::test]
    async fn test_analysis_is_deterministic() {
        let record = record("80331", 2000);
        let first = analyzer().analyze(&record).await.unwrap();
        let second = analyzer().analyze(&record).await.unwrap();

        assert_eq!(first.normalized, second.normalized);
        assert_eq!(
            first.savings.potential_annual,
            second.savings.potential_annual
        );
        assert_eq!(first.confidence, second.confidence);
    }
}
