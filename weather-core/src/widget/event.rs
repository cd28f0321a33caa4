//! Events fed to the reducer.
//!
//! Input events come from the front-end; `*Did*` events are task results and
//! carry the [`RequestId`] of the fetch that produced them.

use crate::model::{Suggestion, WeatherSnapshot};

use super::state::RequestId;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user edited the query text.
    QueryChanged(String),

    /// The user picked a suggestion.
    SuggestionSelected(Suggestion),

    /// One loop turn has passed since a selection.
    SelectionGuardReleased,

    SuggestionsDidLoad { request: RequestId, suggestions: Vec<Suggestion> },

    SuggestionsDidError { request: RequestId, message: String },

    WeatherDidLoad { request: RequestId, snapshot: WeatherSnapshot },

    WeatherDidError { request: RequestId, message: String },
}

impl Event {
    /// Short name for logs; payloads can be large.
    pub fn name(&self) -> &'static str {
        match self {
            Event::QueryChanged(_) => "QueryChanged",
            Event::SuggestionSelected(_) => "SuggestionSelected",
            Event::SelectionGuardReleased => "SelectionGuardReleased",
            Event::SuggestionsDidLoad { .. } => "SuggestionsDidLoad",
            Event::SuggestionsDidError { .. } => "SuggestionsDidError",
            Event::WeatherDidLoad { .. } => "WeatherDidLoad",
            Event::WeatherDidError { .. } => "WeatherDidError",
        }
    }
}
