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

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const SEARCH_LIMIT: &str = "5";

/// OpenWeather client: geocoding for suggestions, current weather for snapshots.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoHit {
    name: String,
    state: Option<String>,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwRain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    rain: OwRain,
    #[serde(default)]
    sys: OwSys,
}

impl From<OwGeoHit> for Suggestion {
    fn from(hit: OwGeoHit) -> Self {
        Suggestion { name: hit.name, region: hit.state.unwrap_or_default(), country: hit.country }
    }
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(res: OwCurrentResponse) -> Self {
        let condition = res
            .weather
            .into_iter()
            .next()
            .map(|w| Condition { text: w.description, icon: icon_url(&w.icon) })
            .unwrap_or_else(|| Condition { text: "Unknown".to_string(), icon: String::new() });

        WeatherSnapshot {
            location: SnapshotLocation {
                name: res.name,
                region: String::new(),
                country: res.sys.country,
            },
            current: CurrentConditions {
                condition,
                temp_c: res.main.temp,
                feelslike_c: res.main.feels_like,
                humidity: res.main.humidity,
                precip_mm: res.rain.one_hour,
                pressure_mb: res.main.pressure,
                observed_at: res.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            },
        }
    }
}

fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{code}@2x.png")
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn search_locations(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let hits: Vec<OwGeoHit> = get_json(
            &self.http,
            self.id(),
            "geocoding",
            &url,
            &[("q", query), ("limit", SEARCH_LIMIT), ("appid", self.api_key.as_str())],
        )
        .await?;

        Ok(hits.into_iter().map(Suggestion::from).collect())
    }

    async fn current_conditions(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let res: OwCurrentResponse = get_json(
            &self.http,
            self.id(),
            "current",
            &url,
            &[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")],
        )
        .await?;

        Ok(res.into())
    }
}
