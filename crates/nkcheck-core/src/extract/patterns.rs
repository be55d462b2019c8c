//! Common regex patterns for German utility bill extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Postal code patterns, in cascade priority order.
    // Standard address form: 12345 City
    pub static ref PLZ_WITH_CITY: Regex = Regex::new(
        r"\b(\d{5})\s+[A-ZÄÖÜ][a-zäöüß]+"
    ).unwrap();

    // Country prefix: D-12345 City or DE-12345 City
    pub static ref PLZ_COUNTRY_PREFIX: Regex = Regex::new(
        r"\b(?:D|DE)-?(\d{5})\s+[A-ZÄÖÜ][a-zäöüß]+"
    ).unwrap();

    // Address block: Street, 12345 City
    pub static ref PLZ_ADDRESS_BLOCK: Regex = Regex::new(
        r",\s*(\d{5})\s+[A-ZÄÖÜ][a-zäöüß]+"
    ).unwrap();

    // Any standalone five-digit group
    pub static ref PLZ_STANDALONE: Regex = Regex::new(
        r"\b(\d{5})\b"
    ).unwrap();

    // Explicit label
    pub static ref PLZ_LABELED: Regex = Regex::new(
        r"(?i)(?:PLZ|Postleitzahl|postal code)[\s:]*(\d{5})"
    ).unwrap();

    // Digit group before a known major city name
    pub static ref PLZ_KNOWN_CITY: Regex = Regex::new(
        r"(?i)\b(\d{5})\s+(?:Berlin|München|Hamburg|Köln|Frankfurt|Stuttgart|Düsseldorf|Dortmund|Essen|Leipzig|Bremen|Dresden|Hannover|Nürnberg|Duisburg)\b"
    ).unwrap();

    // Floor area patterns, in cascade priority order.
    // "m2" needs a trailing boundary so it does not eat into a longer
    // number; "m²" must not get one, \b never holds after a non-word char.
    pub static ref AREA_DIRECT: Regex = Regex::new(
        r"(?i)(\d+(?:[.,]\d+)?)\s*(?:m²|m2\b|qm\b)"
    ).unwrap();

    pub static ref AREA_WOHNFLAECHE: Regex = Regex::new(
        r"(?i)wohnfläche[\s:]*(\d+(?:[.,]\d+)?)\s*(?:m[²2]|qm|quadratmeter)"
    ).unwrap();

    pub static ref AREA_QM: Regex = Regex::new(
        r"(?i)(\d+(?:[.,]\d+)?)\s*(?:quadratmeter|qm)\b"
    ).unwrap();

    pub static ref AREA_GROESSE: Regex = Regex::new(
        r"(?i)größe[\s:]*(\d+(?:[.,]\d+)?)\s*(?:m[²2]|qm)"
    ).unwrap();

    pub static ref AREA_WOHNUNG: Regex = Regex::new(
        r"(?i)wohnung[\s:]*(\d+(?:[.,]\d+)?)\s*(?:m[²2]|qm)"
    ).unwrap();

    // Billing period: DD.MM.YYYY - DD.MM.YYYY
    pub static ref PERIOD_RANGE: Regex = Regex::new(
        r"(\d{1,2})\.(\d{1,2})\.(\d{4})\s*-\s*(\d{1,2})\.(\d{1,2})\.(\d{4})"
    ).unwrap();

    // Monetary amount in German notation: 123 € or 123,45 €
    pub static ref AMOUNT_EUR: Regex = Regex::new(
        r"(\d+(?:,\d{2})?)\s*€"
    ).unwrap();

    // Labeled grand total
    pub static ref TOTAL_LABELED: Regex = Regex::new(
        r"(?i)gesamt[:\s]*(\d+(?:,\d{2})?)\s*€"
    ).unwrap();

    // Per-category cost lines: keyword synonyms, then a bounded stretch of
    // non-digit characters, then an amount with a euro sign. The bounded
    // gap keeps a keyword from picking up an amount half a page away.
    pub static ref COST_HEATING: Regex = Regex::new(
        r"(?i)(?:heizung|heizkosten|warmwasser|brennstoff|gas)\D{0,60}?(\d+(?:,\d{2})?)\s*€"
    ).unwrap();

    pub static ref COST_WATER: Regex = Regex::new(
        r"(?i)(?:kaltwasser|wasserkosten|trinkwasser|wasser)\D{0,60}?(\d+(?:,\d{2})?)\s*€"
    ).unwrap();

    pub static ref COST_WASTE: Regex = Regex::new(
        r"(?i)(?:müllabfuhr|müll|abfall|entsorgung)\D{0,60}?(\d+(?:,\d{2})?)\s*€"
    ).unwrap();

    pub static ref COST_MAINTENANCE: Regex = Regex::new(
        r"(?i)(?:instandhaltung|wartung|reparatur|hausmeister)\D{0,60}?(\d+(?:,\d{2})?)\s*€"
    ).unwrap();

    pub static ref COST_ELECTRICITY: Regex = Regex::new(
        r"(?i)(?:stromkosten|strom|elektrizität)\D{0,60}?(\d+(?:,\d{2})?)\s*€"
    ).unwrap();
}
