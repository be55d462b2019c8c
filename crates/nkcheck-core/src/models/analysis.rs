//! Derived analysis models: normalized costs, comparisons, results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::region::{BaselineCosts, RegionalProfile};

/// Costs normalized to €/m²/month, comparable across apartments.
///
/// `total` is the sum of the four comparable categories; electricity and
/// "other" are excluded because the baseline tables do not cover them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCosts {
    pub heating: Decimal,
    pub water: Decimal,
    pub waste: Decimal,
    pub maintenance: Decimal,
    pub total: Decimal,
    /// Period length used for the per-month division, always ≥ 1.
    pub months_in_period: u32,
}

/// Severity band for a cost deviation from the regional baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Notably below baseline.
    Low,
    /// Within the normal range around baseline.
    Average,
    /// Above baseline, worth a look.
    High,
    /// Far above baseline.
    VeryHigh,
}

/// One category's deviation from its regional baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// User's normalized amount, €/m²/month.
    pub user_amount: Decimal,

    /// Regional baseline, €/m²/month.
    pub baseline_amount: Decimal,

    /// Percentage deviation from baseline; negative means cheaper.
    pub deviation_pct: f64,

    /// Severity band, a pure function of the deviation.
    pub band: Band,

    /// Human-readable summary of the deviation.
    pub message: String,
}

/// Deviation of every comparable category plus the aggregate total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSet {
    pub heating: Comparison,
    pub water: Comparison,
    pub waste: Comparison,
    pub maintenance: Comparison,
    pub total: Comparison,
}

/// Annual savings projection with qualitative recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsEstimate {
    /// Potential savings in €/year across all triggered categories.
    pub potential_annual: Decimal,

    /// Recommendation texts, in display order.
    pub recommendations: Vec<String>,
}

/// Current energy price context, informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergySnapshot {
    /// Household electricity price in €/kWh.
    pub electricity_price_eur_kwh: Decimal,

    /// Where the figure came from (API names or the fallback label).
    pub source: String,
}

/// Aggregate analysis output, constructed once per request and never
/// mutated or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// User costs normalized to €/m²/month.
    pub normalized: NormalizedCosts,

    /// Regional baselines the costs were compared against.
    pub baselines: BaselineCosts,

    /// Per-category and total comparisons.
    pub comparisons: ComparisonSet,

    /// Savings projection and recommendations.
    pub savings: SavingsEstimate,

    /// Location metadata and data-quality classification.
    pub profile: RegionalProfile,

    /// Current energy prices; absent in offline mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergySnapshot>,

    /// Data-quality confidence score, 50–100.
    pub confidence: u8,
}
