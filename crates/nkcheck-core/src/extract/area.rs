//! Floor area extraction.

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

use super::patterns::{AREA_DIRECT, AREA_GROESSE, AREA_QM, AREA_WOHNFLAECHE, AREA_WOHNUNG};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::bill::{MAX_FLOOR_AREA_SQM, MIN_FLOOR_AREA_SQM};

/// Floor area extractor.
///
/// Accepts a number next to an area-unit token, optionally labeled, but
/// only within the plausible apartment range; the first plausible match
/// wins.
pub struct AreaExtractor;

impl AreaExtractor {
    pub fn new() -> Self {
        Self
    }

    fn strategies() -> [(&'static Regex, f32); 5] {
        [
            (&*AREA_DIRECT, 0.7),
            (&*AREA_WOHNFLAECHE, 0.95),
            (&*AREA_QM, 0.7),
            (&*AREA_GROESSE, 0.9),
            (&*AREA_WOHNUNG, 0.85),
        ]
    }
}

impl Default for AreaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AreaExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for (pattern, confidence) in Self::strategies() {
            for caps in pattern.captures_iter(text) {
                let Some(area) = parse_area(&caps[1]) else {
                    continue;
                };
                if !plausible_area(area) {
                    continue;
                }
                if results.iter().any(|r| r.value == area) {
                    continue;
                }

                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(area, confidence, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

fn parse_area(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', ".")).ok()
}

fn plausible_area(area: Decimal) -> bool {
    let area = area.to_f64().unwrap_or(0.0);
    (MIN_FLOOR_AREA_SQM as f64..=MAX_FLOOR_AREA_SQM as f64).contains(&area)
}

/// Extract the floor area in m² from text.
pub fn extract_area(text: &str) -> Option<Decimal> {
    AreaExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_area_direct() {
        assert_eq!(extract_area("Wohnung mit 75 m²"), Some(Decimal::from(75)));
    }

    #[test]
    fn test_extract_area_labeled() {
        assert_eq!(
            extract_area("Wohnfläche: 82,5 m²"),
            Some(Decimal::from_str("82.5").unwrap())
        );
    }

    #[test]
    fn test_extract_area_qm_variant() {
        assert_eq!(extract_area("ca. 64 qm"), Some(Decimal::from(64)));
    }

    #[test]
    fn test_implausible_sizes_skipped() {
        // Below 10 and above 500 are not apartments
        assert_eq!(extract_area("5 m² Kellerabteil"), None);
        assert_eq!(extract_area("Grundstück 1200 m²"), None);
        // The first plausible value wins over earlier implausible ones
        assert_eq!(
            extract_area("Keller 5 m², Wohnfläche 75 m²"),
            Some(Decimal::from(75))
        );
    }
}
