//! Bill input models: extraction drafts and validated bill records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum plausible apartment floor area in m².
pub const MIN_FLOOR_AREA_SQM: u32 = 10;
/// Maximum plausible apartment floor area in m².
pub const MAX_FLOOR_AREA_SQM: u32 = 500;

/// Lowest numeric value of a valid German postal code (01000 and up).
pub const MIN_PLZ: u32 = 1000;
/// Highest numeric value of a valid German postal code.
pub const MAX_PLZ: u32 = 99999;

/// Average days per month, used to convert billing periods to months.
const DAYS_PER_MONTH: f64 = 30.44;

/// Check whether a string is a valid German postal code.
///
/// Valid codes are exactly five ASCII digits with a numeric value in
/// [01000, 99999]; "00000" through "00999" are not assigned.
pub fn is_valid_plz(plz: &str) -> bool {
    plz.len() == 5
        && plz.chars().all(|c| c.is_ascii_digit())
        && plz
            .parse::<u32>()
            .is_ok_and(|n| (MIN_PLZ..=MAX_PLZ).contains(&n))
}

/// Billing period covered by a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Create a period, requiring end to fall after start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of days between start and end.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Period length in whole months, never less than one.
    ///
    /// Uses the 30.44-day average month so that a 365-day period maps to
    /// 12 months. The floor of one keeps the downstream per-month division
    /// defined even for degenerate short periods.
    pub fn months(&self) -> u32 {
        let months = (self.days() as f64 / DAYS_PER_MONTH).round() as i64;
        months.max(1) as u32
    }
}

/// Cost totals for the billing period, in euros per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Heating and hot water.
    pub heating: Decimal,
    /// Cold water and sewage.
    pub water: Decimal,
    /// Waste collection.
    pub waste: Decimal,
    /// Building maintenance and caretaker.
    pub maintenance: Decimal,
    /// Electricity, when billed through the landlord.
    pub electricity: Decimal,
    /// Anything else on the bill.
    pub other: Decimal,
}

impl CostBreakdown {
    /// True when at least one category carries a positive amount.
    pub fn has_any(&self) -> bool {
        [
            self.heating,
            self.water,
            self.waste,
            self.maintenance,
            self.electricity,
            self.other,
        ]
        .iter()
        .any(|a| *a > Decimal::ZERO)
    }

    fn check_non_negative(&self) -> Result<(), ValidationError> {
        let categories = [
            ("heating", self.heating),
            ("water", self.water),
            ("waste", self.waste),
            ("maintenance", self.maintenance),
            ("electricity", self.electricity),
            ("other", self.other),
        ];
        for (name, amount) in categories {
            if amount < Decimal::ZERO {
                return Err(ValidationError::NegativeAmount {
                    category: name.to_string(),
                    amount,
                });
            }
        }
        Ok(())
    }
}

/// Partial bill data recovered from OCR text.
///
/// Every field is optional: extraction failure for an individual field is
/// not an error, it just leaves the field unset. Drafts are merged with
/// manual corrections and then validated into a [`BillRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillDraft {
    /// Extracted postal code, already range-checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Extracted floor area in m².
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_area_sqm: Option<Decimal>,

    /// Extracted billing period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<BillingPeriod>,

    /// Extracted per-category cost totals.
    pub costs: DraftCosts,

    /// Labeled grand total, kept for cross-checking only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
}

/// Per-category cost candidates; absent means the category was not found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftCosts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waste: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity: Option<Decimal>,
}

impl BillDraft {
    /// Overlay manual corrections on top of this draft.
    ///
    /// Fields set in `corrections` win; unset fields keep the extracted
    /// value.
    pub fn merge(mut self, corrections: BillDraft) -> BillDraft {
        if corrections.postal_code.is_some() {
            self.postal_code = corrections.postal_code;
        }
        if corrections.floor_area_sqm.is_some() {
            self.floor_area_sqm = corrections.floor_area_sqm;
        }
        if corrections.period.is_some() {
            self.period = corrections.period;
        }
        if corrections.costs.heating.is_some() {
            self.costs.heating = corrections.costs.heating;
        }
        if corrections.costs.water.is_some() {
            self.costs.water = corrections.costs.water;
        }
        if corrections.costs.waste.is_some() {
            self.costs.waste = corrections.costs.waste;
        }
        if corrections.costs.maintenance.is_some() {
            self.costs.maintenance = corrections.costs.maintenance;
        }
        if corrections.costs.electricity.is_some() {
            self.costs.electricity = corrections.costs.electricity;
        }
        if corrections.total_amount.is_some() {
            self.total_amount = corrections.total_amount;
        }
        self
    }

    /// List the fields a caller would usually want confirmed by hand.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.postal_code.is_none() {
            missing.push("postal_code");
        }
        if self.floor_area_sqm.is_none() {
            missing.push("floor_area_sqm");
        }
        if self.period.is_none() {
            missing.push("period");
        }
        if self.costs.heating.is_none() {
            missing.push("heating");
        }
        missing
    }

    /// Validate the draft into an immutable [`BillRecord`].
    ///
    /// `default_period` fills in the billing period when none was
    /// extracted; cost categories that were not found default to zero.
    pub fn into_record(
        self,
        default_period: Option<BillingPeriod>,
    ) -> Result<BillRecord, ValidationError> {
        let postal_code = self
            .postal_code
            .ok_or_else(|| ValidationError::InvalidPostalCode(String::new()))?;
        let floor_area_sqm = self.floor_area_sqm.ok_or(
            ValidationError::FloorAreaOutOfRange(
                Decimal::ZERO,
                MIN_FLOOR_AREA_SQM,
                MAX_FLOOR_AREA_SQM,
            ),
        )?;
        let period = self
            .period
            .or(default_period)
            .ok_or(ValidationError::InvalidPeriod {
                start: NaiveDate::MIN,
                end: NaiveDate::MIN,
            })?;

        let heating_defaulted = self.costs.heating.is_none();
        let costs = CostBreakdown {
            heating: self.costs.heating.unwrap_or_default(),
            water: self.costs.water.unwrap_or_default(),
            waste: self.costs.waste.unwrap_or_default(),
            maintenance: self.costs.maintenance.unwrap_or_default(),
            electricity: self.costs.electricity.unwrap_or_default(),
            other: Decimal::ZERO,
        };

        BillRecord::new(postal_code, floor_area_sqm, period, costs, heating_defaulted)
    }
}

/// Validated bill input, immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillRecord {
    /// German postal code, five digits.
    pub postal_code: String,

    /// Apartment floor area in m².
    pub floor_area_sqm: Decimal,

    /// Period the bill covers.
    pub period: BillingPeriod,

    /// Per-category cost totals for the whole period.
    pub costs: CostBreakdown,

    /// True when a critical field (heating cost) was defaulted rather
    /// than extracted or confirmed; lowers the confidence score.
    pub critical_defaulted: bool,
}

impl BillRecord {
    /// Validate and construct a bill record.
    pub fn new(
        postal_code: String,
        floor_area_sqm: Decimal,
        period: BillingPeriod,
        costs: CostBreakdown,
        critical_defaulted: bool,
    ) -> Result<Self, ValidationError> {
        if !is_valid_plz(&postal_code) {
            return Err(ValidationError::InvalidPostalCode(postal_code));
        }

        let area = floor_area_sqm.to_f64().unwrap_or(0.0);
        if !(MIN_FLOOR_AREA_SQM as f64..=MAX_FLOOR_AREA_SQM as f64).contains(&area) {
            return Err(ValidationError::FloorAreaOutOfRange(
                floor_area_sqm,
                MIN_FLOOR_AREA_SQM,
                MAX_FLOOR_AREA_SQM,
            ));
        }

        if period.end <= period.start {
            return Err(ValidationError::InvalidPeriod {
                start: period.start,
                end: period.end,
            });
        }

        costs.check_non_negative()?;
        if !costs.has_any() {
            return Err(ValidationError::NoCostData);
        }

        Ok(Self {
            postal_code,
            floor_area_sqm,
            period,
            costs,
            critical_defaulted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn year_period() -> BillingPeriod {
        BillingPeriod::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap()
    }

    #[test]
    fn test_plz_validation() {
        assert!(is_valid_plz("10115"));
        assert!(is_valid_plz("01000"));
        assert!(is_valid_plz("99999"));

        assert!(!is_valid_plz("00000"));
        assert!(!is_valid_plz("00999"));
        assert!(!is_valid_plz("1234"));
        assert!(!is_valid_plz("123456"));
        assert!(!is_valid_plz("ABCDE"));
        assert!(!is_valid_plz("1011５")); // non-ASCII digit
    }

    #[test]
    fn test_period_months() {
        assert_eq!(year_period().months(), 12);

        let half = BillingPeriod::new(date(2024, 1, 1), date(2024, 7, 1)).unwrap();
        assert_eq!(half.months(), 6);

        // A few days still count as one month
        let short = BillingPeriod::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();
        assert_eq!(short.months(), 1);
    }

    #[test]
    fn test_period_rejects_inverted_range() {
        assert!(BillingPeriod::new(date(2024, 6, 1), date(2024, 1, 1)).is_err());
        assert!(BillingPeriod::new(date(2024, 6, 1), date(2024, 6, 1)).is_err());
    }

    #[test]
    fn test_record_rejects_small_floor_area() {
        let costs = CostBreakdown {
            heating: Decimal::from(1350),
            ..Default::default()
        };
        let err = BillRecord::new(
            "10115".to_string(),
            Decimal::from(5),
            year_period(),
            costs,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::FloorAreaOutOfRange(..)));
    }

    #[test]
    fn test_record_rejects_empty_costs() {
        let err = BillRecord::new(
            "10115".to_string(),
            Decimal::from(75),
            year_period(),
            CostBreakdown::default(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::NoCostData));
    }

    #[test]
    fn test_draft_merge_prefers_corrections() {
        let draft = BillDraft {
            postal_code: Some("10115".to_string()),
            floor_area_sqm: Some(Decimal::from(60)),
            ..Default::default()
        };
        let corrections = BillDraft {
            floor_area_sqm: Some(Decimal::from(75)),
            ..Default::default()
        };

        let merged = draft.merge(corrections);
        assert_eq!(merged.postal_code.as_deref(), Some("10115"));
        assert_eq!(merged.floor_area_sqm, Some(Decimal::from(75)));
    }

    #[test]
    fn test_draft_into_record_flags_defaulted_heating() {
        let draft = BillDraft {
            postal_code: Some("10115".to_string()),
            floor_area_sqm: Some(Decimal::from(75)),
            period: Some(year_period()),
            costs: DraftCosts {
                water: Some(Decimal::from_str("450.00").unwrap()),
                ..Default::default()
            },
            total_amount: None,
        };

        let record = draft.into_record(None).unwrap();
        assert!(record.critical_defaulted);
        assert_eq!(record.costs.heating, Decimal::ZERO);
    }
}
