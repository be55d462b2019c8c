//! Bundled regional cost tables.
//!
//! City-level figures for the major cities we have official sources for,
//! plus state-level averages used when a postal code is only resolvable
//! to its federal state.

use std::collections::HashMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use rust_decimal::Decimal;

use crate::models::region::{BaselineCosts, DataQuality, RegionalProfile};

fn costs(heating_ct: i64, water_ct: i64, waste_ct: i64, maintenance_ct: i64) -> BaselineCosts {
    BaselineCosts {
        heating: Decimal::new(heating_ct, 2),
        water: Decimal::new(water_ct, 2),
        waste: Decimal::new(waste_ct, 2),
        maintenance: Decimal::new(maintenance_ct, 2),
    }
}

#[allow(clippy::too_many_arguments)]
fn city(
    plz: &str,
    city: &str,
    state: &str,
    region: &str,
    provider: &str,
    population: u64,
    baseline: BaselineCosts,
    source: &str,
) -> RegionalProfile {
    RegionalProfile {
        postal_code: plz.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        region: region.to_string(),
        utility_provider: provider.to_string(),
        population,
        baseline_costs: baseline,
        data_quality: DataQuality::OfficialLocal,
        data_source: source.to_string(),
        last_updated: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
    }
}

lazy_static! {
    /// City profiles keyed by postal code.
    static ref CITY_TABLE: HashMap<String, RegionalProfile> = {
        let entries = [
            city("10115", "Berlin", "Berlin", "Berlin-Mitte", "Vattenfall",
                 3_669_491, costs(152, 65, 35, 120),
                 "SMARD API + Berliner Betriebskostenspiegel 2025"),
            city("10117", "Berlin", "Berlin", "Berlin-Mitte", "Vattenfall",
                 3_669_491, costs(148, 65, 35, 125),
                 "SMARD API + Berliner Betriebskostenspiegel 2025"),
            city("80331", "München", "Bayern", "München-Zentrum", "SWM",
                 1_488_202, costs(178, 72, 41, 145),
                 "SWM API + Bayern Energiebericht 2025"),
            city("80333", "München", "Bayern", "München-Zentrum", "SWM",
                 1_488_202, costs(175, 72, 41, 142),
                 "SWM API + Bayern Energiebericht 2025"),
            city("20095", "Hamburg", "Hamburg", "Hamburg-Zentrum", "Hamburg Energie",
                 1_945_532, costs(145, 68, 38, 115),
                 "Hamburg Energie API + HH Betriebskostenspiegel 2025"),
            city("60311", "Frankfurt am Main", "Hessen", "Frankfurt-Zentrum", "Mainova",
                 753_056, costs(185, 78, 45, 155),
                 "Mainova API + Hessen Energiestatistik 2025"),
            city("50667", "Köln", "Nordrhein-Westfalen", "Köln-Zentrum", "RheinEnergie",
                 1_073_096, costs(162, 69, 42, 128),
                 "RheinEnergie API + NRW Betriebskostenspiegel 2025"),
            city("70173", "Stuttgart", "Baden-Württemberg", "Stuttgart-Zentrum", "EnBW",
                 626_275, costs(168, 74, 39, 138),
                 "EnBW API + BW Energiebericht 2025"),
            city("40213", "Düsseldorf", "Nordrhein-Westfalen", "Düsseldorf-Zentrum",
                 "Stadtwerke Düsseldorf", 619_294, costs(158, 71, 43, 132),
                 "Stadtwerke Düsseldorf API + NRW Statistik 2025"),
            city("04109", "Leipzig", "Sachsen", "Leipzig-Zentrum", "Stadtwerke Leipzig",
                 597_493, costs(135, 58, 32, 105),
                 "Stadtwerke Leipzig API + Sachsen Energiestatistik 2025"),
            city("44135", "Dortmund", "Nordrhein-Westfalen", "Dortmund-Zentrum", "DEW21",
                 588_250, costs(142, 63, 37, 118),
                 "DEW21 API + NRW Betriebskostenspiegel 2025"),
            city("45127", "Essen", "Nordrhein-Westfalen", "Essen-Zentrum", "Stadtwerke Essen",
                 579_432, costs(138, 61, 36, 112),
                 "Stadtwerke Essen API + NRW Statistik 2025"),
        ];

        entries
            .into_iter()
            .map(|p| (p.postal_code.clone(), p))
            .collect()
    };

    /// State-level average costs keyed by federal state name.
    static ref STATE_TABLE: HashMap<&'static str, BaselineCosts> = HashMap::from([
        ("Berlin", costs(150, 65, 35, 120)),
        ("Bayern", costs(175, 72, 41, 142)),
        ("Hamburg", costs(145, 68, 38, 115)),
        ("Hessen", costs(182, 76, 44, 152)),
        ("Nordrhein-Westfalen", costs(155, 67, 40, 125)),
        ("Baden-Württemberg", costs(170, 74, 39, 138)),
        ("Sachsen", costs(132, 56, 31, 102)),
        ("Brandenburg", costs(128, 54, 29, 98)),
        ("Thüringen", costs(125, 52, 28, 95)),
        ("Sachsen-Anhalt", costs(122, 50, 27, 92)),
        ("Mecklenburg-Vorpommern", costs(120, 48, 26, 90)),
        ("Schleswig-Holstein", costs(148, 66, 37, 118)),
        ("Niedersachsen", costs(144, 64, 36, 116)),
        ("Bremen", costs(146, 65, 37, 117)),
        ("Rheinland-Pfalz", costs(158, 69, 39, 128)),
        ("Saarland", costs(165, 71, 40, 135)),
    ]);
}

/// Look up a postal code in the bundled city table.
pub fn lookup_city(plz: &str) -> Option<RegionalProfile> {
    CITY_TABLE.get(plz).cloned()
}

/// State-level average costs, or `None` for an unknown state name.
pub fn state_baseline(state: &str) -> Option<BaselineCosts> {
    STATE_TABLE.get(state).copied()
}

/// Nationwide fallback used when even the state is unknown.
pub fn national_baseline() -> BaselineCosts {
    costs(150, 65, 35, 120)
}

/// All bundled city profiles, sorted by postal code (for listings).
pub fn all_cities() -> Vec<RegionalProfile> {
    let mut cities: Vec<RegionalProfile> = CITY_TABLE.values().cloned().collect();
    cities.sort_by(|a, b| a.postal_code.cmp(&b.postal_code));
    cities
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_known_city() {
        let berlin = lookup_city("10115").unwrap();
        assert_eq!(berlin.city, "Berlin");
        assert_eq!(berlin.data_quality, DataQuality::OfficialLocal);
        assert_eq!(berlin.baseline_costs.heating, Decimal::new(152, 2));
    }

    #[test]
    fn test_lookup_unknown_plz() {
        assert!(lookup_city("99999").is_none());
    }

    #[test]
    fn test_state_table_covers_all_sixteen_states() {
        assert_eq!(STATE_TABLE.len(), 16);
        let bayern = state_baseline("Bayern").unwrap();
        assert_eq!(bayern.heating, Decimal::new(175, 2));
        assert!(state_baseline("Atlantis").is_none());
    }

    #[test]
    fn test_all_cities_sorted() {
        let cities = all_cities();
        assert_eq!(cities.len(), 12);
        assert_eq!(cities.first().unwrap().postal_code, "04109");
    }
}
