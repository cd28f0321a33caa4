//! Side effects declared by the reducer and carried out by the runtime.

use super::state::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up locations matching `query`.
    SearchLocations { request: RequestId, query: String },

    /// Abort any in-flight location search.
    CancelSearch,

    /// Fetch current conditions for `city`, then hold the result for the reveal delay.
    FetchWeather { request: RequestId, city: String },

    /// Emit `SelectionGuardReleased` on the next loop turn.
    ReleaseSelectionGuard,
}
