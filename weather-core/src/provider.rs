use crate::{
    Config, Suggestion, WeatherSnapshot,
    error::{ProviderError, Result},
    provider::{openweather::OpenWeatherProvider, weatherapi::WeatherApiProvider},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{fmt::Debug, sync::Arc};
use tracing::debug;

pub mod openweather;
pub mod weatherapi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WeatherApi => "weatherapi",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::WeatherApi]
    }

    /// Environment variable that overrides the stored API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "WEATHER_OPENWEATHER_API_KEY",
            ProviderId::WeatherApi => "WEATHER_WEATHERAPI_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = ProviderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "weatherapi" => Ok(ProviderId::WeatherApi),
            _ => Err(ProviderError::UnknownProvider(value.to_string())),
        }
    }
}

/// A hosted weather API offering location search and current conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// Locations matching a partial city name, in the provider's order.
    async fn search_locations(&self, query: &str) -> Result<Vec<Suggestion>>;

    /// Current conditions for a city name.
    async fn current_conditions(&self, city: &str) -> Result<WeatherSnapshot>;
}

/// Pick the API key for `id`: an environment override wins over the config file.
pub fn resolve_api_key(id: ProviderId, config: &Config, env_key: Option<String>) -> Result<String> {
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        return Ok(key);
    }

    config.provider_api_key(id).map(str::to_owned).ok_or(ProviderError::MissingApiKey(id))
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Result<Arc<dyn WeatherProvider>> {
    let api_key = resolve_api_key(id, config, std::env::var(id.env_var()).ok())?;

    let provider: Arc<dyn WeatherProvider> = match id {
        ProviderId::OpenWeather => Arc::new(OpenWeatherProvider::new(api_key)),
        ProviderId::WeatherApi => Arc::new(WeatherApiProvider::new(api_key)),
    };

    Ok(provider)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> Result<Arc<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

/// GET `url` and decode a JSON body, mapping every failure to a [`ProviderError`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    provider: ProviderId,
    endpoint: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    debug!(%provider, endpoint, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| request_error(provider, endpoint, e))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| request_error(provider, endpoint, e))?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            endpoint,
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body)
        .map_err(|source| ProviderError::Decode { provider, endpoint, source })
}

/// The request URL carries the API key as a query parameter, so it is stripped.
fn request_error(provider: ProviderId, endpoint: &'static str, e: reqwest::Error) -> ProviderError {
    ProviderError::Request { provider, endpoint, source: e.without_url() }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
