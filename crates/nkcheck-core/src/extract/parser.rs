//! Bill parser composing the individual field extractors.

use tracing::{debug, info};

use super::area::AreaExtractor;
use super::costs::{extract_costs, extract_total};
use super::period::PeriodExtractor;
use super::plz::PlzExtractor;
use super::FieldExtractor;
use crate::models::bill::BillDraft;

/// Parser recovering structured bill data from raw OCR text.
///
/// A pure function over its input: malformed or empty text never fails,
/// it just yields a draft with fewer fields. The caller decides whether
/// enough was recovered to proceed or whether to ask for manual input.
pub struct BillParser;

impl BillParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw OCR text into a partial bill draft.
    pub fn parse(&self, text: &str) -> BillDraft {
        info!("parsing bill from {} characters of text", text.len());

        let postal_code = PlzExtractor::new().extract(text).map(|m| m.value);
        let floor_area_sqm = AreaExtractor::new().extract(text).map(|m| m.value);
        let period = PeriodExtractor::new().extract(text).map(|m| m.value);
        let costs = extract_costs(text);
        let total_amount = extract_total(text);

        let draft = BillDraft {
            postal_code,
            floor_area_sqm,
            period,
            costs,
            total_amount,
        };

        let missing = draft.missing_fields();
        if missing.is_empty() {
            debug!("all critical fields extracted");
        } else {
            debug!(?missing, "extraction left fields unset");
        }

        draft
    }
}

impl Default for BillParser {
    fn default() -> Self {
        Self::new()
    }
}
