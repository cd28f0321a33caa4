use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::Result,
    model::{Condition, CurrentConditions, SnapshotLocation, Suggestion, WeatherSnapshot},
    provider::{ProviderId, get_json},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// WeatherAPI.com client.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the client at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct WaSearchHit {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    #[serde(default)]
    precip_mm: f64,
    pressure_mb: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaSearchHit> for Suggestion {
    fn from(hit: WaSearchHit) -> Self {
        Suggestion { name: hit.name, region: hit.region, country: hit.country }
    }
}

impl From<WaResponse> for WeatherSnapshot {
    fn from(res: WaResponse) -> Self {
        let WaResponse { location, current } = res;

        WeatherSnapshot {
            location: SnapshotLocation {
                name: location.name,
                region: location.region,
                country: location.country,
            },
            current: CurrentConditions {
                condition: Condition {
                    text: current.condition.text,
                    icon: absolute_icon_url(&current.condition.icon),
                },
                temp_c: current.temp_c,
                feelslike_c: current.feelslike_c,
                humidity: current.humidity,
                precip_mm: current.precip_mm,
                pressure_mb: current.pressure_mb,
                observed_at: current
                    .last_updated_epoch
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            },
        }
    }
}

/// WeatherAPI hands out protocol-relative icon URLs (`//cdn.weatherapi.com/...`).
fn absolute_icon_url(icon: &str) -> String {
    match icon.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => icon.to_string(),
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    async fn search_locations(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = format!("{}/search.json", self.base_url);
        let hits: Vec<WaSearchHit> = get_json(
            &self.http,
            self.id(),
            "search",
            &url,
            &[("key", self.api_key.as_str()), ("q", query)],
        )
        .await?;

        Ok(hits.into_iter().map(Suggestion::from).collect())
    }

    async fn current_conditions(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/current.json", self.base_url);
        let res: WaResponse = get_json(
            &self.http,
            self.id(),
            "current",
            &url,
            &[("key", self.api_key.as_str()), ("q", city)],
        )
        .await?;

        Ok(res.into())
    }
}
