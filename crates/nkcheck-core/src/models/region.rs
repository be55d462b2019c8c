//! Regional baseline reference data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Average operating costs for a locality, in €/m²/month per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineCosts {
    pub heating: Decimal,
    pub water: Decimal,
    pub waste: Decimal,
    pub maintenance: Decimal,
}

impl BaselineCosts {
    /// Sum of the four comparable categories.
    pub fn total(&self) -> Decimal {
        self.heating + self.water + self.waste + self.maintenance
    }
}

/// How trustworthy the baseline figures are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    /// City-level figures from an official local source.
    OfficialLocal,
    /// Synthesized from the containing state's averages.
    StateAverage,
    /// Rough estimate with no specific source.
    #[default]
    Estimated,
}

/// Baseline reference data for one location, keyed by postal code.
///
/// Read-only: sourced from the bundled city table or synthesized from the
/// state-level table when the exact postal code is unknown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalProfile {
    /// Postal code this profile answers for.
    pub postal_code: String,

    /// City name.
    pub city: String,

    /// Federal state (Bundesland).
    pub state: String,

    /// District or region label, display only.
    pub region: String,

    /// Dominant utility provider, display only.
    pub utility_provider: String,

    /// City population; zero when unknown.
    pub population: u64,

    /// Average costs to compare against.
    pub baseline_costs: BaselineCosts,

    /// Quality classification of the baseline figures.
    pub data_quality: DataQuality,

    /// Where the figures came from, display only.
    pub data_source: String,

    /// When the figures were last refreshed.
    pub last_updated: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_baseline_total() {
        let baseline = BaselineCosts {
            heating: Decimal::new(152, 2),
            water: Decimal::new(65, 2),
            waste: Decimal::new(35, 2),
            maintenance: Decimal::new(120, 2),
        };
        assert_eq!(baseline.total(), Decimal::new(372, 2));
    }
}
