use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location proposed for a partial query, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub region: String,
    pub country: String,
}

impl Suggestion {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), region: region.into(), country: country.into() }
    }

    /// A suggestion carrying only a city name, for lookups typed in full.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "", "")
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for part in [&self.region, &self.country] {
            if !part.is_empty() {
                write!(f, ", {part}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotLocation {
    pub name: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Absolute URL of the provider's condition icon.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub condition: Condition,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub humidity: u8,
    pub precip_mm: f64,
    pub pressure_mb: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Current conditions for one location, as read at fetch time.
///
/// A snapshot is never merged with a later one: each weather fetch replaces it
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: SnapshotLocation,
    pub current: CurrentConditions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_display_joins_all_parts() {
        let s = Suggestion::new("London", "City of London, Greater London", "United Kingdom");
        assert_eq!(s.to_string(), "London, City of London, Greater London, United Kingdom");
    }

    #[test]
    fn suggestion_display_skips_empty_region() {
        let s = Suggestion::new("Monaco", "", "Monaco");
        assert_eq!(s.to_string(), "Monaco, Monaco");

        assert_eq!(Suggestion::named("Paris").to_string(), "Paris");
    }
}
