//! Data-quality confidence scoring.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::bill::BillRecord;
use crate::models::config::ConfidenceConfig;
use crate::models::region::{DataQuality, RegionalProfile};

/// Scores how much trust to put in an analysis result.
///
/// The score reflects input and baseline quality, not the arithmetic:
/// synthesized baselines, tiny localities, and defaulted bill fields all
/// lower it, official data for a large city raises it. Clamped so a
/// result is never presented as either worthless or certain.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, profile: &RegionalProfile, record: &BillRecord) -> u8 {
        let mut score: i32 = 100;

        if profile.data_quality != DataQuality::OfficialLocal {
            score -= self.config.non_official_penalty;
        }
        if profile.population < self.config.small_town_population {
            score -= self.config.small_town_penalty;
        }
        if record.critical_defaulted || record.costs.heating == Decimal::ZERO {
            score -= self.config.missing_field_penalty;
        }
        if profile.data_quality == DataQuality::OfficialLocal
            && profile.population > self.config.large_city_population
        {
            score += self.config.large_city_bonus;
        }

        let clamped = score.clamp(self.config.floor, self.config.ceiling);
        debug!(score, clamped, "confidence scored");
        clamped as u8
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(ConfidenceConfig::default())
    }
}
