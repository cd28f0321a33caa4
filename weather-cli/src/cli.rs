use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode, required};
use tracing::info;
use weather_core::{
    Config, Event, ProviderId, Suggestion, Widget,
    provider::{WeatherProvider, default_provider_from_config, provider_from_config},
    view,
};

use crate::interactive;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup with city suggestions")]
pub struct Cli {
    /// Log requests and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "weatherapi" or "openweather".
        provider: String,
    },

    /// Search for a city interactively and show its current weather.
    Search {
        /// Start with this query instead of prompting.
        query: Option<String>,

        /// Provider to use instead of the configured default.
        #[arg(long)]
        provider: Option<String>,
    },

    /// Show current weather for a city.
    Show {
        /// City name.
        city: String,

        #[arg(long)]
        provider: Option<String>,
    },

    /// List locations matching a partial city name.
    Suggest {
        query: String,

        #[arg(long)]
        provider: Option<String>,

        /// Print the suggestions as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Search { query, provider } => {
                let widget = build_widget(provider.as_deref())?;
                interactive::run(widget, query).await
            }
            Command::Show { city, provider } => {
                let mut widget = build_widget(provider.as_deref())?;
                widget.dispatch(Event::SuggestionSelected(Suggestion::named(city)));
                interactive::wait_for_weather(&mut widget).await;

                let view = view::render(widget.state());
                if let Some(error) = view.error {
                    bail!(error);
                }
                if let Some(card) = view.card {
                    print!("{card}");
                }
                Ok(())
            }
            Command::Suggest { query, provider, json } => {
                let mut widget = build_widget(provider.as_deref())?;
                widget.dispatch(Event::QueryChanged(query));
                widget.settle().await;

                let suggestions = &widget.state().suggestions;
                if json {
                    let out = serde_json::to_string_pretty(suggestions)
                        .context("Failed to serialize suggestions")?;
                    println!("{out}");
                } else if suggestions.is_empty() {
                    eprintln!("No matching locations.");
                } else {
                    for label in view::render(widget.state()).suggestions {
                        println!("{label}");
                    }
                }
                Ok(())
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut cfg = Config::load()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(required!("API key must not be empty"))
        .prompt()?;

    cfg.upsert_provider_api_key(id, api_key.trim().to_string());

    if cfg.default_provider_id().ok() != Some(id) {
        let make_default = Confirm::new(&format!("Make {id} the default provider?"))
            .with_default(true)
            .prompt()?;
        if make_default {
            cfg.set_default_provider(id);
        }
    }

    let path = cfg.save()?;
    info!(provider = %id, "stored API key");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

/// Resolve the provider from `--provider` or the config default and wrap it in a widget.
fn build_widget(provider: Option<&str>) -> anyhow::Result<Widget> {
    let cfg = Config::load()?;
    let provider = resolve_provider(provider, &cfg)?;
    Ok(Widget::new(provider, &cfg.widget))
}

fn resolve_provider(flag: Option<&str>, cfg: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = match flag {
        Some(name) => provider_from_config(ProviderId::try_from(name)?, cfg)?,
        None => default_provider_from_config(cfg)?,
    };

    Ok(provider)
}
