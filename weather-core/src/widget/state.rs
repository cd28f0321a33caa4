use crate::model::{Suggestion, WeatherSnapshot};

/// Identifies one fetch so late completions of superseded fetches can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Everything the view needs, plus the bookkeeping for in-flight fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    /// Free-text city query; empty means no active search.
    pub query: String,

    /// Latest suggestion list, in provider order.
    pub suggestions: Vec<Suggestion>,

    /// Last weather reading; cleared whenever a weather fetch starts.
    pub snapshot: Option<WeatherSnapshot>,

    /// True from the start of a weather fetch until it resolves.
    pub is_loading: bool,

    /// User-facing message for the last failed weather fetch.
    pub error: Option<String>,

    /// Set by a selection until the next loop turn.
    pub selection_guard: bool,

    pub(crate) pending_search: Option<RequestId>,
    pub(crate) pending_weather: Option<RequestId>,
    last_request: u64,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId(self.last_request)
    }

    pub fn is_searching(&self) -> bool {
        self.pending_search.is_some()
    }

    /// Whether any fetch or the guard release is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.is_searching() || self.is_loading || self.selection_guard
    }
}
