//! Current energy price lookup.
//!
//! Two independent market-data sources are queried concurrently; either
//! one failing is tolerated. Both succeeding yields their average, one
//! succeeding yields that value, and neither succeeding falls back to a
//! configured recent household average. An analysis never fails because
//! of energy data.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::NkError;
use crate::models::analysis::EnergySnapshot;
use crate::models::config::{AnalyzerConfig, EnergyConfig};

const AWATTAR_BASE: &str = "https://api.awattar.de/v1/marketdata";
const ENERGY_CHARTS_BASE: &str = "https://api.energy-charts.info/price?bzn=DE-LU";

/// Provides the current household electricity price.
#[allow(async_fn_in_trait)]
pub trait EnergyLookup {
    /// Fetch a price snapshot. Infallible by design: implementations
    /// degrade to a configured fallback instead of erroring.
    async fn snapshot(&self) -> EnergySnapshot;
}

/// Fixed-price lookup for offline mode and tests.
#[derive(Debug, Clone)]
pub struct StaticEnergyLookup {
    price: Decimal,
}

impl StaticEnergyLookup {
    /// Use the configured fallback average as a fixed price.
    pub fn from_config(config: &EnergyConfig) -> Self {
        Self {
            price: config.fallback_electricity_eur_kwh,
        }
    }
}

impl EnergyLookup for StaticEnergyLookup {
    async fn snapshot(&self) -> EnergySnapshot {
        EnergySnapshot {
            electricity_price_eur_kwh: self.price,
            source: "Konfigurierter Durchschnittswert".to_string(),
        }
    }
}

/// Market-data backed lookup querying the aWATTar exchange feed and the
/// Energy-Charts aggregate in parallel.
pub struct HttpEnergyLookup {
    client: reqwest::Client,
    energy: EnergyConfig,
    awattar_url: String,
    energy_charts_url: String,
}

#[derive(Debug, Deserialize)]
struct AwattarResponse {
    data: Vec<AwattarEntry>,
}

/// One hourly slot of exchange market data, price in €/MWh.
#[derive(Debug, Deserialize)]
struct AwattarEntry {
    marketprice: f64,
}

/// One price point from the Energy-Charts series, €/MWh.
#[derive(Debug, Deserialize)]
struct EnergyChartsResponse {
    price: Vec<f64>,
}

impl HttpEnergyLookup {
    /// Build a lookup from pipeline configuration.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, NkError> {
        let client = reqwest::Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|e| NkError::Config(format!("http client: {e}")))?;

        Ok(Self {
            client,
            energy: config.energy.clone(),
            awattar_url: AWATTAR_BASE.to_string(),
            energy_charts_url: ENERGY_CHARTS_BASE.to_string(),
        })
    }

    /// Point the lookup at different endpoints (tests).
    pub fn with_urls(
        mut self,
        awattar_url: impl Into<String>,
        energy_charts_url: impl Into<String>,
    ) -> Self {
        self.awattar_url = awattar_url.into();
        self.energy_charts_url = energy_charts_url.into();
        self
    }

    /// Wholesale €/MWh to household €/kWh: divide by 1000, add the
    /// configured markup for taxes, levies, and grid fees.
    fn to_household_price(&self, wholesale_eur_mwh: f64) -> Option<Decimal> {
        let wholesale = Decimal::try_from(wholesale_eur_mwh).ok()?;
        let price = wholesale / Decimal::from(1000) + self.energy.household_markup_eur_kwh;
        Some(price.round_dp(3))
    }

    async fn fetch_awattar(&self) -> Result<Option<Decimal>, reqwest::Error> {
        let response: AwattarResponse = self
            .client
            .get(&self.awattar_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .data
            .last()
            .and_then(|entry| self.to_household_price(entry.marketprice)))
    }

    async fn fetch_energy_charts(&self) -> Result<Option<Decimal>, reqwest::Error> {
        let response: EnergyChartsResponse = self
            .client
            .get(&self.energy_charts_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .price
            .last()
            .and_then(|price| self.to_household_price(*price)))
    }
}

impl EnergyLookup for HttpEnergyLookup {
    async fn snapshot(&self) -> EnergySnapshot {
        let (awattar, energy_charts) =
            tokio::join!(self.fetch_awattar(), self.fetch_energy_charts());

        let awattar = awattar
            .map_err(|e| warn!("aWATTar lookup failed: {e}"))
            .ok()
            .flatten();
        let energy_charts = energy_charts
            .map_err(|e| warn!("Energy-Charts lookup failed: {e}"))
            .ok()
            .flatten();

        let snapshot = match (awattar, energy_charts) {
            (Some(a), Some(b)) => EnergySnapshot {
                electricity_price_eur_kwh: ((a + b) / Decimal::from(2)).round_dp(3),
                source: "Mittel aus aWATTar + Energy-Charts".to_string(),
            },
            (Some(a), None) => EnergySnapshot {
                electricity_price_eur_kwh: a,
                source: "aWATTar Börsenpreis".to_string(),
            },
            (None, Some(b)) => EnergySnapshot {
                electricity_price_eur_kwh: b,
                source: "Energy-Charts (Fraunhofer ISE)".to_string(),
            },
            (None, None) => EnergySnapshot {
                electricity_price_eur_kwh: self.energy.fallback_electricity_eur_kwh,
                source: "Statischer Durchschnittswert (Fallback)".to_string(),
            },
        };

        debug!(
            price = %snapshot.electricity_price_eur_kwh,
            source = %snapshot.source,
            "energy snapshot"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup() -> HttpEnergyLookup {
        HttpEnergyLookup::new(&AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_household_price_conversion() {
        // 90 €/MWh wholesale -> 0.09 €/kWh + 0.25 markup = 0.34
        let price = lookup().to_household_price(90.0).unwrap();
        assert_eq!(price, Decimal::new(340, 3));
    }

    #[test]
    fn test_awattar_response_parsing() {
        let json = r#"{"object":"list","data":[
            {"start_timestamp":1700000000000,"end_timestamp":1700003600000,
             "marketprice":92.5,"unit":"Eur/MWh"}]}"#;
        let parsed: AwattarResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data[0].marketprice, 92.5);
    }

    #[tokio::test]
    async fn test_static_lookup_uses_config_fallback() {
        let config = AnalyzerConfig::default();
        let snapshot = StaticEnergyLookup::from_config(&config.energy)
            .snapshot()
            .await;
        assert_eq!(snapshot.electricity_price_eur_kwh, Decimal::new(397, 3));
    }

    #[tokio::test]
    async fn test_http_lookup_falls_back_when_unreachable() {
        // Point at an address nothing listens on; both sources fail and
        // the configured fallback must win.
        let snapshot = lookup()
            .with_urls("http://127.0.0.1:9/a", "http://127.0.0.1:9/b")
            .snapshot()
            .await;
        assert_eq!(snapshot.electricity_price_eur_kwh, Decimal::new(397, 3));
        assert!(snapshot.source.contains("Fallback"));
    }
}
