//! Per-category cost extraction.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{
    AMOUNT_EUR, COST_ELECTRICITY, COST_HEATING, COST_MAINTENANCE, COST_WASTE, COST_WATER,
    TOTAL_LABELED,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::bill::DraftCosts;

/// Upper bound (exclusive) on a plausible single-category amount in €.
/// Values at or above this are assumed to be subtotal or account noise.
const MAX_PLAUSIBLE_AMOUNT: i64 = 1000;

/// Parse a German-formatted amount ("1350" or "112,50") into a Decimal.
pub fn parse_german_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', ".")).ok()
}

fn plausible(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount < Decimal::from(MAX_PLAUSIBLE_AMOUNT)
}

/// Extractor for one cost category.
///
/// Matches any of the category's keyword synonyms followed, within a
/// bounded window, by a euro amount. Among all matches the maximum
/// plausible value wins, which guards against picking up per-line
/// subtotals below the real category total.
pub struct CostExtractor {
    pattern: &'static Regex,
}

impl CostExtractor {
    pub fn heating() -> Self {
        Self { pattern: &*COST_HEATING }
    }

    pub fn water() -> Self {
        Self { pattern: &*COST_WATER }
    }

    pub fn waste() -> Self {
        Self { pattern: &*COST_WASTE }
    }

    pub fn maintenance() -> Self {
        Self { pattern: &*COST_MAINTENANCE }
    }

    pub fn electricity() -> Self {
        Self { pattern: &*COST_ELECTRICITY }
    }
}

impl FieldExtractor for CostExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text)
            .into_iter()
            .max_by(|a, b| a.value.cmp(&b.value))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in self.pattern.captures_iter(text) {
            let Some(amount) = parse_german_amount(&caps[1]) else {
                continue;
            };
            if !plausible(amount) {
                continue;
            }

            let full_match = caps.get(0).unwrap();
            results.push(
                ExtractionMatch::new(amount, 0.8, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            );
        }

        results
    }
}

/// Extract all cost categories from bill text.
pub fn extract_costs(text: &str) -> DraftCosts {
    DraftCosts {
        heating: CostExtractor::heating().extract(text).map(|m| m.value),
        water: CostExtractor::water().extract(text).map(|m| m.value),
        waste: CostExtractor::waste().extract(text).map(|m| m.value),
        maintenance: CostExtractor::maintenance().extract(text).map(|m| m.value),
        electricity: CostExtractor::electricity().extract(text).map(|m| m.value),
    }
}

/// Extract the labeled grand total, if present.
pub fn extract_total(text: &str) -> Option<Decimal> {
    TOTAL_LABELED
        .captures(text)
        .and_then(|caps| parse_german_amount(&caps[1]))
        .filter(|amount| *amount > Decimal::ZERO)
}

/// Extract every euro amount in the text, for diagnostics.
pub fn extract_all_amounts(text: &str) -> Vec<Decimal> {
    AMOUNT_EUR
        .captures_iter(text)
        .filter_map(|caps| parse_german_amount(&caps[1]))
        .collect()
}
