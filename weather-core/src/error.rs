use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ProviderId;

/// Errors raised while resolving or talking to a weather provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to send request to {provider} ({endpoint}): {source}")]
    Request {
        provider: ProviderId,
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} {endpoint} request failed with status {status}: {body}")]
    Status { provider: ProviderId, endpoint: &'static str, status: StatusCode, body: String },

    #[error("Failed to parse {provider} {endpoint} JSON: {source}")]
    Decode {
        provider: ProviderId,
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "No API key configured for provider '{0}'.\n\
         Hint: run `weather configure {0}` and enter your API key."
    )]
    MissingApiKey(ProviderId),

    #[error("Unknown provider '{0}'. Supported providers: openweather, weatherapi.")]
    UnknownProvider(String),

    #[error(
        "No default provider configured.\n\
         Hint: run `weather configure <provider>` (e.g. `weather configure weatherapi`) first."
    )]
    NoDefaultProvider,
}

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;
