//! Billing period extraction.

use chrono::NaiveDate;

use super::patterns::PERIOD_RANGE;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::bill::BillingPeriod;

/// Billing period extractor for `DD.MM.YYYY - DD.MM.YYYY` ranges.
///
/// When no range is present the period stays unset; the caller has to
/// supply a default.
pub struct PeriodExtractor;

impl PeriodExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PeriodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PeriodExtractor {
    type Output = ExtractionMatch<BillingPeriod>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in PERIOD_RANGE.captures_iter(text) {
            let start = parse_date(&caps[1], &caps[2], &caps[3]);
            let end = parse_date(&caps[4], &caps[5], &caps[6]);

            let (Some(start), Some(end)) = (start, end) else {
                continue;
            };
            let Ok(period) = BillingPeriod::new(start, end) else {
                continue;
            };

            let full_match = caps.get(0).unwrap();
            results.push(
                ExtractionMatch::new(period, 0.9, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            );
        }

        results
    }
}

fn parse_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Extract the billing period from text.
pub fn extract_period(text: &str) -> Option<BillingPeriod> {
    PeriodExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_period() {
        let period = extract_period("Abrechnungszeitraum: 01.01.2024 - 31.12.2024").unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(period.months(), 12);
    }

    #[test]
    fn test_single_digit_day_and_month() {
        let period = extract_period("1.7.2023 - 30.6.2024").unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
        assert_eq!(period.months(), 12);
    }

    #[test]
    fn test_no_period_found() {
        assert!(extract_period("Heizkosten 1350,00 €").is_none());
    }

    #[test]
    fn test_inverted_range_skipped() {
        assert!(extract_period("31.12.2024 - 01.01.2024").is_none());
    }

    #[test]
    fn test_impossible_date_skipped() {
        assert!(extract_period("31.02.2024 - 31.12.2024").is_none());
    }
}
