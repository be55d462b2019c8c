//! Location resolvers: bundled table with optional network fallback.

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use super::table::{lookup_city, national_baseline, state_baseline};
use crate::error::{LocationError, NkError};
use crate::models::config::AnalyzerConfig;
use crate::models::region::{DataQuality, RegionalProfile};

const ZIPPOPOTAM_BASE: &str = "https://api.zippopotam.us/de";

/// Maps a postal code to a regional baseline profile.
///
/// Resolvers are injected into the pipeline rather than reached through
/// globals, so tests and offline callers can substitute their own.
#[allow(async_fn_in_trait)]
pub trait LocationResolver {
    /// Resolve a postal code, or fail with a location error.
    ///
    /// Resolution failure terminates an analysis: without a baseline
    /// there is nothing to compare against.
    async fn resolve(&self, plz: &str) -> Result<RegionalProfile, LocationError>;
}

/// Resolver backed only by the bundled city table (offline mode).
#[derive(Debug, Default)]
pub struct StaticResolver;

impl StaticResolver {
    pub fn new() -> Self {
        Self
    }
}

impl LocationResolver for StaticResolver {
    async fn resolve(&self, plz: &str) -> Result<RegionalProfile, LocationError> {
        lookup_city(plz).ok_or_else(|| LocationError::UnknownPostalCode(plz.to_string()))
    }
}

/// Resolver with network fallback: bundled table first, then a
/// Zippopotam-style place API, synthesizing a state-average profile for
/// codes the table does not know. A single attempt, no retry; callers
/// needing more resilience wrap their own policy around it.
pub struct HttpResolver {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PlaceResponse {
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(rename = "place name")]
    name: String,
    state: String,
    #[serde(rename = "state abbreviation")]
    state_abbreviation: String,
}

impl HttpResolver {
    /// Build a resolver from pipeline configuration.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, NkError> {
        let client = reqwest::Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|e| NkError::Config(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: ZIPPOPOTAM_BASE.to_string(),
        })
    }

    /// Point the resolver at a different place API (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_place(&self, plz: &str) -> Result<Place, LocationError> {
        let url = format!("{}/{}", self.base_url, plz);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LocationError::UnknownPostalCode(plz.to_string()));
        }
        let response = response.error_for_status()?;

        let mut parsed: PlaceResponse = response
            .json()
            .await
            .map_err(|e| LocationError::MalformedResponse(e.to_string()))?;

        if parsed.places.is_empty() {
            return Err(LocationError::MalformedResponse(format!(
                "no places returned for {plz}"
            )));
        }
        Ok(parsed.places.remove(0))
    }
}

impl LocationResolver for HttpResolver {
    async fn resolve(&self, plz: &str) -> Result<RegionalProfile, LocationError> {
        if let Some(profile) = lookup_city(plz) {
            debug!(plz, city = %profile.city, "resolved from bundled table");
            return Ok(profile);
        }

        debug!(plz, "not in bundled table, querying place API");
        let place = self.fetch_place(plz).await?;
        let profile = synthesize_profile(plz, &place);
        if profile.data_quality == DataQuality::Estimated {
            warn!(plz, state = %place.state, "state not in baseline table, using national estimate");
        }
        Ok(profile)
    }
}

/// Build a state-average profile for a postal code the bundled table does
/// not know.
fn synthesize_profile(plz: &str, place: &Place) -> RegionalProfile {
    let (baseline_costs, data_quality) = match state_baseline(&place.state) {
        Some(costs) => (costs, DataQuality::StateAverage),
        None => (national_baseline(), DataQuality::Estimated),
    };

    RegionalProfile {
        postal_code: plz.to_string(),
        city: place.name.clone(),
        state: place.state.clone(),
        region: format!("{}-{}", place.name, place.state_abbreviation),
        utility_provider: "Regionaler Versorger".to_string(),
        population: 0,
        baseline_costs,
        data_quality,
        data_source: format!("Landesdurchschnitt {}", place.state),
        last_updated: Utc::now().date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_static_resolver_hit() {
        let profile = StaticResolver::new().resolve("10115").await.unwrap();
        assert_eq!(profile.city, "Berlin");
        assert_eq!(profile.data_quality, DataQuality::OfficialLocal);
    }

    #[tokio::test]
    async fn test_static_resolver_miss() {
        let err = StaticResolver::new().resolve("99999").await.unwrap_err();
        assert!(matches!(err, LocationError::UnknownPostalCode(_)));
    }

    #[test]
    fn test_synthesized_profile_uses_state_table() {
        let place = Place {
            name: "Garmisch-Partenkirchen".to_string(),
            state: "Bayern".to_string(),
            state_abbreviation: "BY".to_string(),
        };

        let profile = synthesize_profile("82467", &place);
        assert_eq!(profile.data_quality, DataQuality::StateAverage);
        assert_eq!(profile.baseline_costs.heating, Decimal::new(175, 2));
        assert_eq!(profile.region, "Garmisch-Partenkirchen-BY");
        assert_eq!(profile.population, 0);
    }

    #[test]
    fn test_synthesized_profile_unknown_state() {
        let place = Place {
            name: "Somewhere".to_string(),
            state: "Unbekannt".to_string(),
            state_abbreviation: "XX".to_string(),
        };

        let profile = synthesize_profile("12345", &place);
        assert_eq!(profile.data_quality, DataQuality::Estimated);
        assert_eq!(profile.baseline_costs.heating, Decimal::new(150, 2));
    }

    #[test]
    fn test_place_response_parsing() {
        let json = r#"{
            "post code": "82467",
            "country": "Germany",
            "places": [
                {"place name": "Garmisch-Partenkirchen", "state": "Bayern",
                 "state abbreviation": "BY", "latitude": "47.5", "longitude": "11.1"}
            ]
        }"#;

        let parsed: PlaceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.places[0].name, "Garmisch-Partenkirchen");
        assert_eq!(parsed.places[0].state, "Bayern");
    }
}
