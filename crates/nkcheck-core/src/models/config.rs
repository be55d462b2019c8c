//! Configuration structures for the analysis pipeline.
//!
//! The band thresholds, savings triggers, and confidence deltas here are
//! provisional business rules inherited from the product side, not derived
//! statistics. They ship as defaults so that a locale can tune them
//! without touching code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration for the nkcheck pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Comparison band thresholds.
    pub bands: BandConfig,

    /// Savings estimation triggers and advice tiers.
    pub savings: SavingsConfig,

    /// Confidence scoring deltas.
    pub confidence: ConfidenceConfig,

    /// Energy price lookup fallbacks.
    pub energy: EnergyConfig,

    /// HTTP client settings for external lookups.
    pub http: HttpConfig,
}

/// Band thresholds, as percentage deviation from baseline.
///
/// The bands partition the real line: below `low` is Low, `[low, high)`
/// is Average, `[high, very_high)` is High, and `very_high` and above is
/// VeryHigh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub low_pct: f64,
    pub high_pct: f64,
    pub very_high_pct: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            low_pct: -15.0,
            high_pct: 15.0,
            very_high_pct: 50.0,
        }
    }
}

/// Savings triggers and generic-advice tiers.
///
/// The per-category multipliers are asymmetric on purpose: water and
/// maintenance costs vary more between buildings than heating does, so
/// they need a larger excess before a recommendation fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsConfig {
    /// Heating recommendation fires above this multiple of baseline.
    pub heating_trigger: Decimal,

    /// Water recommendation fires above this multiple of baseline.
    pub water_trigger: Decimal,

    /// Maintenance recommendation fires above this multiple of baseline.
    pub maintenance_trigger: Decimal,

    /// Annual savings above this add the landlord/breakdown advice, €.
    pub landlord_advice_eur: Decimal,

    /// Annual savings above this add the tenant-association advice, €.
    pub tenant_association_eur: Decimal,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            heating_trigger: Decimal::new(12, 1),      // 1.2
            water_trigger: Decimal::new(13, 1),        // 1.3
            maintenance_trigger: Decimal::new(15, 1),  // 1.5
            landlord_advice_eur: Decimal::from(200),
            tenant_association_eur: Decimal::from(500),
        }
    }
}

/// Deltas and thresholds for the confidence score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Deducted when the baseline is not official city-level data.
    pub non_official_penalty: i32,

    /// Deducted when the city population is below `small_town_population`.
    pub small_town_penalty: i32,

    /// Deducted when a critical bill field was absent or defaulted.
    pub missing_field_penalty: i32,

    /// Added back for large cities with official data.
    pub large_city_bonus: i32,

    /// Population below which a locality counts as a small town.
    pub small_town_population: u64,

    /// Population above which the large-city bonus applies.
    pub large_city_population: u64,

    /// Lower clamp of the final score.
    pub floor: i32,

    /// Upper clamp of the final score.
    pub ceiling: i32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            non_official_penalty: 25,
            small_town_penalty: 15,
            missing_field_penalty: 20,
            large_city_bonus: 10,
            small_town_population: 50_000,
            large_city_population: 500_000,
            floor: 50,
            ceiling: 100,
        }
    }
}

/// Energy price lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Household electricity price used when every source fails, €/kWh.
    /// Recent German household average; review periodically.
    pub fallback_electricity_eur_kwh: Decimal,

    /// Markup added to wholesale exchange prices to approximate the
    /// household price (taxes, levies, grid fees), €/kWh.
    pub household_markup_eur_kwh: Decimal,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            fallback_electricity_eur_kwh: Decimal::new(397, 3), // 0.397
            household_markup_eur_kwh: Decimal::new(25, 2),      // 0.25
        }
    }
}

/// HTTP client settings for the place and energy APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: "nkcheck/0.1".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_roundtrip() {
        let config = AnalyzerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalyzerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.bands.very_high_pct, 50.0);
        assert_eq!(parsed.savings.heating_trigger, Decimal::new(12, 1));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AnalyzerConfig =
            serde_json::from_str(r#"{"bands": {"high_pct": 20.0}}"#).unwrap();
        assert_eq!(parsed.bands.high_pct, 20.0);
        assert_eq!(parsed.bands.low_pct, -15.0);
        assert_eq!(parsed.confidence.floor, 50);
    }
}
