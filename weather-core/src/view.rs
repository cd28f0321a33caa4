//! Pure rendering of [`WidgetState`] into text for a terminal front-end.

use std::fmt;

use crate::{model::WeatherSnapshot, widget::WidgetState};

pub const TITLE: &str = "Weather App";
pub const PLACEHOLDER: &str = "Enter city to see suggestions";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for animation tick `tick`.
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// What the front-end should show for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub title: &'static str,
    /// Current query, or the placeholder when it is empty.
    pub input: String,
    pub input_is_placeholder: bool,
    /// One label per suggestion, same order as the state.
    pub suggestions: Vec<String>,
    pub spinner: bool,
    pub error: Option<String>,
    pub card: Option<Card>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub heading: String,
    pub description: String,
    pub icon: String,
    pub temperature: String,
    pub details: Vec<String>,
}

pub fn render(state: &WidgetState) -> View {
    let (input, input_is_placeholder) = if state.query.is_empty() {
        (PLACEHOLDER.to_string(), true)
    } else {
        (state.query.clone(), false)
    };

    View {
        title: TITLE,
        input,
        input_is_placeholder,
        suggestions: state.suggestions.iter().map(ToString::to_string).collect(),
        spinner: state.is_loading,
        error: state.error.clone(),
        card: state.snapshot.as_ref().map(render_card),
    }
}

fn render_card(snapshot: &WeatherSnapshot) -> Card {
    let location = &snapshot.location;
    let current = &snapshot.current;

    let heading = if location.country.is_empty() {
        location.name.clone()
    } else {
        format!("{}, {}", location.name, location.country)
    };

    let mut details = vec![
        format!("Feels Like: {}°C", current.feelslike_c),
        format!("Humidity: {}%", current.humidity),
        format!("Precipitation: {} mm", current.precip_mm),
        format!("Pressure: {} mb", current.pressure_mb),
    ];
    if let Some(at) = current.observed_at {
        details.push(format!("Updated: {}", at.format("%Y-%m-%d %H:%M UTC")));
    }

    Card {
        heading,
        description: current.condition.text.clone(),
        icon: current.condition.icon.clone(),
        temperature: format!("{}°C", current.temp_c),
        details,
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "{}", self.description)?;
        if !self.icon.is_empty() {
            writeln!(f, "{}", self.icon)?;
        }
        writeln!(f, "{}", self.temperature)?;
        for line in &self.details {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "> {}", self.input)?;
        for label in &self.suggestions {
            writeln!(f, "  {label}")?;
        }
        if self.spinner {
            writeln!(f, "{} Loading...", spinner_frame(0))?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "{error}")?;
        }
        if let Some(card) = &self.card {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Condition, CurrentConditions, SnapshotLocation, Suggestion, WeatherSnapshot,
    };
    use chrono::{TimeZone, Utc};

    fn london() -> WeatherSnapshot {
        WeatherSnapshot {
            location: SnapshotLocation {
                name: "London".into(),
                region: "City of London, Greater London".into(),
                country: "United Kingdom".into(),
            },
            current: CurrentConditions {
                condition: Condition {
                    text: "Partly cloudy".into(),
                    icon: "https://cdn.weatherapi.com/weather/64x64/day/116.png".into(),
                },
                temp_c: 11.0,
                feelslike_c: 9.1,
                humidity: 82,
                precip_mm: 0.1,
                pressure_mb: 1012.0,
                observed_at: Some(Utc.with_ymd_and_hms(2024, 11, 28, 14, 15, 0).unwrap()),
            },
        }
    }

    #[test]
    fn empty_state_shows_only_placeholder() {
        let view = render(&WidgetState::new());

        assert_eq!(view.input, PLACEHOLDER);
        assert!(view.input_is_placeholder);
        assert!(view.suggestions.is_empty());
        assert!(!view.spinner);
        assert!(view.error.is_none());
        assert!(view.card.is_none());
        assert_eq!(view.to_string(), format!("{TITLE}\n> {PLACEHOLDER}\n"));
    }

    #[test]
    fn suggestions_render_in_order() {
        let mut state = WidgetState::new();
        state.query = "Lon".into();
        state.suggestions = vec![
            Suggestion::new("London", "City of London", "UK"),
            Suggestion::new("Long Beach", "", "US"),
        ];

        let view = render(&state);

        assert_eq!(view.input, "Lon");
        assert_eq!(view.suggestions, vec!["London, City of London, UK", "Long Beach, US"]);
    }

    #[test]
    fn spinner_and_error_follow_state() {
        let mut state = WidgetState::new();
        state.is_loading = true;
        assert!(render(&state).spinner);

        state.is_loading = false;
        state.error = Some("Failed to fetch weather data".into());
        let view = render(&state);
        assert!(!view.spinner);
        assert!(view.to_string().contains("Failed to fetch weather data"));
    }

    #[test]
    fn card_lists_current_conditions() {
        let mut state = WidgetState::new();
        state.snapshot = Some(london());

        let card = render(&state).card.expect("card shown");

        assert_eq!(card.heading, "London, United Kingdom");
        assert_eq!(card.description, "Partly cloudy");
        assert_eq!(card.temperature, "11°C");
        assert_eq!(
            card.details,
            vec![
                "Feels Like: 9.1°C",
                "Humidity: 82%",
                "Precipitation: 0.1 mm",
                "Pressure: 1012 mb",
                "Updated: 2024-11-28 14:15 UTC",
            ]
        );
        assert!(card.to_string().contains("cdn.weatherapi.com"));
    }

    #[test]
    fn spinner_frames_cycle() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
