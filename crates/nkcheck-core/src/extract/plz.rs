//! Postal code (PLZ) extraction and validation.

use regex::Regex;

use super::patterns::{
    PLZ_ADDRESS_BLOCK, PLZ_COUNTRY_PREFIX, PLZ_KNOWN_CITY, PLZ_LABELED, PLZ_STANDALONE,
    PLZ_WITH_CITY,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::bill::is_valid_plz;

/// Postal code extractor.
///
/// Runs a cascade of competing patterns in priority order. Every candidate
/// is range-checked, duplicates collapse to the first occurrence, and the
/// overall first survivor is the extractor's answer.
pub struct PlzExtractor;

impl PlzExtractor {
    pub fn new() -> Self {
        Self
    }

    fn strategies() -> [(&'static Regex, f32); 6] {
        [
            (&*PLZ_WITH_CITY, 0.9),
            (&*PLZ_COUNTRY_PREFIX, 0.9),
            (&*PLZ_ADDRESS_BLOCK, 0.85),
            (&*PLZ_STANDALONE, 0.6),
            (&*PLZ_LABELED, 0.95),
            (&*PLZ_KNOWN_CITY, 0.95),
        ]
    }
}

impl Default for PlzExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PlzExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for (pattern, confidence) in Self::strategies() {
            for caps in pattern.captures_iter(text) {
                let plz = &caps[1];
                if !is_valid_plz(plz) {
                    continue;
                }
                // Duplicates keep their first-found position in the list
                if results.iter().any(|r| r.value == plz) {
                    continue;
                }

                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(plz.to_string(), confidence, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Extract the best postal code candidate from text.
pub fn extract_plz(text: &str) -> Option<String> {
    PlzExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plz_with_city() {
        let text = "Musterstraße 12\n10115 Berlin";
        assert_eq!(extract_plz(text), Some("10115".to_string()));
    }

    #[test]
    fn test_extract_plz_labeled() {
        let text = "Postleitzahl: 80331";
        assert_eq!(extract_plz(text), Some("80331".to_string()));
    }

    #[test]
    fn test_extract_plz_country_prefix() {
        let text = "D-60311 Frankfurt";
        assert_eq!(extract_plz(text), Some("60311".to_string()));
    }

    #[test]
    fn test_city_pattern_outranks_standalone() {
        // 12345 appears first but only as a bare digit group; the
        // city-adjacent candidate wins on pattern priority.
        let text = "Rechnungsnummer 12345 vom 03.01.2024\nAnschrift: 20095 Hamburg";
        assert_eq!(extract_plz(text), Some("20095".to_string()));
    }

    #[test]
    fn test_implausible_codes_filtered() {
        assert_eq!(extract_plz("00000 Nirgendwo"), None);
        assert_eq!(extract_plz("Betrag 123456 €"), None);
    }

    #[test]
    fn test_duplicates_collapse_preserving_order() {
        let text = "10115 Berlin ... nochmal 10115 Berlin ... 80331 München";
        let results = PlzExtractor::new().extract_all(text);
        let values: Vec<&str> = results.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["10115", "80331"]);
    }
}
