//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers (location search, current conditions)
//! - Shared domain models (suggestions, snapshots)
//! - The city search widget: state, reducer and task runtime
//! - Text rendering of the widget state
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;
pub mod widget;

pub use config::{Config, ProviderConfig, WidgetSettings};
pub use error::ProviderError;
pub use model::{Suggestion, WeatherSnapshot};
pub use provider::{ProviderId, WeatherProvider};
pub use widget::{Event, Widget, WidgetState};
