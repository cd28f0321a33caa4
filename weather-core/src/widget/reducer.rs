//! Reducer: `(state, event) -> DispatchResult`.
//!
//! All state transitions of the widget happen here. The reducer never does
//! I/O; anything asynchronous is returned as an [`Effect`].

use tracing::{debug, warn};

use super::{effect::Effect, event::Event, state::WidgetState};

/// Shown for every failed weather fetch, whatever the cause.
pub const WEATHER_ERROR_MESSAGE: &str = "Failed to fetch weather data";

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Whether anything visible changed.
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self { changed: true, effects: Vec::new() }
    }

    pub fn changed_with(effects: Vec<Effect>) -> Self {
        Self { changed: true, effects }
    }
}

pub fn reduce(state: &mut WidgetState, event: Event) -> DispatchResult {
    match event {
        Event::QueryChanged(query) => {
            // Echo of the text a selection just wrote into the query.
            if state.selection_guard && query == state.query {
                return DispatchResult::unchanged();
            }

            state.selection_guard = false;
            state.query = query;

            let trimmed = state.query.trim();
            if trimmed.is_empty() {
                state.suggestions.clear();
                state.pending_search = None;
                return DispatchResult::changed_with(vec![Effect::CancelSearch]);
            }

            let query = trimmed.to_string();
            let request = state.next_request();
            state.pending_search = Some(request);
            DispatchResult::changed_with(vec![Effect::SearchLocations { request, query }])
        }

        Event::SuggestionSelected(suggestion) => {
            state.query = suggestion.name.clone();
            state.selection_guard = true;
            state.suggestions.clear();
            state.pending_search = None;

            state.is_loading = true;
            state.error = None;
            state.snapshot = None;
            let request = state.next_request();
            state.pending_weather = Some(request);

            DispatchResult::changed_with(vec![
                Effect::CancelSearch,
                Effect::FetchWeather { request, city: suggestion.name },
                Effect::ReleaseSelectionGuard,
            ])
        }

        Event::SelectionGuardReleased => {
            state.selection_guard = false;
            DispatchResult::unchanged()
        }

        Event::SuggestionsDidLoad { request, suggestions } => {
            if state.pending_search != Some(request) {
                debug!(request = request.get(), "dropping stale suggestions");
                return DispatchResult::unchanged();
            }

            state.pending_search = None;
            state.suggestions = suggestions;
            DispatchResult::changed()
        }

        Event::SuggestionsDidError { request, message } => {
            if state.pending_search != Some(request) {
                debug!(request = request.get(), "dropping stale suggestion error");
                return DispatchResult::unchanged();
            }

            warn!(request = request.get(), error = %message, "suggestion fetch failed");
            state.pending_search = None;
            state.suggestions.clear();
            DispatchResult::changed()
        }

        Event::WeatherDidLoad { request, snapshot } => {
            if state.pending_weather != Some(request) {
                debug!(request = request.get(), "dropping stale weather snapshot");
                return DispatchResult::unchanged();
            }

            state.pending_weather = None;
            state.snapshot = Some(snapshot);
            state.is_loading = false;
            DispatchResult::changed()
        }

        Event::WeatherDidError { request, message } => {
            if state.pending_weather != Some(request) {
                debug!(request = request.get(), "dropping stale weather error");
                return DispatchResult::unchanged();
            }

            warn!(request = request.get(), error = %message, "weather fetch failed");
            state.pending_weather = None;
            state.snapshot = None;
            state.error = Some(WEATHER_ERROR_MESSAGE.to_string());
            state.is_loading = false;
            DispatchResult::changed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Condition, CurrentConditions, SnapshotLocation, Suggestion, WeatherSnapshot,
    };
    use crate::widget::state::RequestId;

    fn london() -> Suggestion {
        Suggestion::new("London", "City of London, Greater London", "UK")
    }

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location: SnapshotLocation {
                name: name.into(),
                region: String::new(),
                country: "UK".into(),
            },
            current: CurrentConditions {
                condition: Condition { text: "Sunny".into(), icon: String::new() },
                temp_c: 20.0,
                feelslike_c: 19.0,
                humidity: 40,
                precip_mm: 0.0,
                pressure_mb: 1015.0,
                observed_at: None,
            },
        }
    }

    fn search_request(result: &DispatchResult) -> RequestId {
        match result.effects.as_slice() {
            [Effect::SearchLocations { request, .. }] => *request,
            other => panic!("expected a single search effect, got {other:?}"),
        }
    }

    fn weather_request(result: &DispatchResult) -> RequestId {
        result
            .effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchWeather { request, .. } => Some(*request),
                _ => None,
            })
            .expect("weather fetch effect")
    }

    #[test]
    fn empty_query_clears_suggestions_without_request() {
        let mut state = WidgetState::new();
        state.suggestions = vec![london()];

        for query in ["", "   "] {
            let result = reduce(&mut state, Event::QueryChanged(query.into()));

            assert!(state.suggestions.is_empty());
            assert!(!state.is_searching());
            assert_eq!(result.effects, vec![Effect::CancelSearch]);
        }
    }

    #[test]
    fn query_issues_trimmed_search() {
        let mut state = WidgetState::new();
        let result = reduce(&mut state, Event::QueryChanged(" Lon ".into()));

        assert!(result.changed);
        assert_eq!(state.query, " Lon ");
        match &result.effects[..] {
            [Effect::SearchLocations { query, .. }] => assert_eq!(query, "Lon"),
            other => panic!("unexpected effects: {other:?}"),
        }
        assert!(state.is_searching());
    }

    #[test]
    fn single_character_query_searches() {
        let mut state = WidgetState::new();
        let result = reduce(&mut state, Event::QueryChanged("L".into()));

        match &result.effects[..] {
            [Effect::SearchLocations { query, .. }] => assert_eq!(query, "L"),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn loaded_suggestions_replace_list_in_order() {
        let mut state = WidgetState::new();
        state.suggestions = vec![Suggestion::named("Old")];
        let request = search_request(&reduce(&mut state, Event::QueryChanged("Lon".into())));

        let incoming = vec![london(), Suggestion::new("Londonderry", "Derry", "UK")];
        let result = reduce(
            &mut state,
            Event::SuggestionsDidLoad { request, suggestions: incoming.clone() },
        );

        assert!(result.changed);
        assert_eq!(state.suggestions, incoming);
        assert!(!state.is_searching());
    }

    #[test]
    fn failed_search_clears_list() {
        let mut state = WidgetState::new();
        state.suggestions = vec![london()];
        let request = search_request(&reduce(&mut state, Event::QueryChanged("Lond".into())));

        reduce(&mut state, Event::SuggestionsDidError { request, message: "503".into() });

        assert!(state.suggestions.is_empty());
        assert!(state.error.is_none());
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let mut state = WidgetState::new();
        let first = search_request(&reduce(&mut state, Event::QueryChanged("Lo".into())));
        let second = search_request(&reduce(&mut state, Event::QueryChanged("Lon".into())));

        let result = reduce(
            &mut state,
            Event::SuggestionsDidLoad {
                request: first,
                suggestions: vec![Suggestion::named("Lome")],
            },
        );
        assert!(!result.changed);
        assert!(state.suggestions.is_empty());

        reduce(
            &mut state,
            Event::SuggestionsDidLoad { request: second, suggestions: vec![london()] },
        );
        assert_eq!(state.suggestions, vec![london()]);

        // Late error for the superseded search must not wipe the list.
        reduce(&mut state, Event::SuggestionsDidError { request: first, message: "boom".into() });
        assert_eq!(state.suggestions, vec![london()]);
    }

    #[test]
    fn selection_sets_query_clears_list_and_fetches_once() {
        let mut state = WidgetState::new();
        state.suggestions = vec![london()];
        state.error = Some("old".into());
        state.snapshot = Some(snapshot("Paris"));

        let result = reduce(&mut state, Event::SuggestionSelected(london()));

        assert_eq!(state.query, "London");
        assert!(state.suggestions.is_empty());
        assert!(state.selection_guard);
        assert!(state.is_loading);
        assert!(state.error.is_none());
        assert!(state.snapshot.is_none());

        let fetches: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::FetchWeather { city, .. } => Some(city.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fetches, vec!["London"]);
        assert!(result.effects.contains(&Effect::ReleaseSelectionGuard));
        assert!(!result.effects.iter().any(|e| matches!(e, Effect::SearchLocations { .. })));
    }

    #[test]
    fn selection_invalidates_in_flight_search() {
        let mut state = WidgetState::new();
        let request = search_request(&reduce(&mut state, Event::QueryChanged("Lon".into())));
        reduce(&mut state, Event::SuggestionSelected(london()));

        reduce(&mut state, Event::SuggestionsDidLoad { request, suggestions: vec![london()] });

        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn guard_suppresses_echoed_query_until_released() {
        let mut state = WidgetState::new();
        reduce(&mut state, Event::SuggestionSelected(london()));

        let echoed = reduce(&mut state, Event::QueryChanged("London".into()));
        assert_eq!(echoed, DispatchResult::unchanged());

        reduce(&mut state, Event::SelectionGuardReleased);
        assert!(!state.selection_guard);

        let typed = reduce(&mut state, Event::QueryChanged("London".into()));
        assert_eq!(typed.effects.len(), 1);
        assert!(matches!(typed.effects[0], Effect::SearchLocations { .. }));
    }

    #[test]
    fn weather_success_publishes_snapshot() {
        let mut state = WidgetState::new();
        let request = weather_request(&reduce(&mut state, Event::SuggestionSelected(london())));

        reduce(&mut state, Event::WeatherDidLoad { request, snapshot: snapshot("London") });

        assert!(!state.is_loading);
        assert_eq!(state.snapshot.as_ref().map(|s| s.location.name.as_str()), Some("London"));
        assert!(state.error.is_none());
    }

    #[test]
    fn weather_failure_sets_fixed_message() {
        let mut state = WidgetState::new();
        let request = weather_request(&reduce(&mut state, Event::SuggestionSelected(london())));

        reduce(
            &mut state,
            Event::WeatherDidError { request, message: "status 500: upstream".into() },
        );

        assert!(!state.is_loading);
        assert!(state.snapshot.is_none());
        assert_eq!(state.error.as_deref(), Some(WEATHER_ERROR_MESSAGE));
    }

    #[test]
    fn stale_weather_result_is_dropped() {
        let mut state = WidgetState::new();
        let first = weather_request(&reduce(&mut state, Event::SuggestionSelected(london())));
        let second = weather_request(&reduce(
            &mut state,
            Event::SuggestionSelected(Suggestion::new("Paris", "Ile-de-France", "France")),
        ));

        reduce(&mut state, Event::WeatherDidLoad { request: first, snapshot: snapshot("London") });
        assert!(state.snapshot.is_none());
        assert!(state.is_loading);

        reduce(&mut state, Event::WeatherDidLoad { request: second, snapshot: snapshot("Paris") });
        assert_eq!(state.snapshot.as_ref().map(|s| s.location.name.as_str()), Some("Paris"));
        assert!(!state.is_loading);
    }
}
