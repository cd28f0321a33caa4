//! City search widget.
//!
//! The widget is an explicit state struct driven by a single reducer. Input and
//! task completions arrive as [`Event`]s; the reducer mutates [`WidgetState`]
//! and returns [`Effect`]s, which the [`Widget`] runtime turns into cancellable
//! tokio tasks whose results come back as events.

pub mod effect;
pub mod event;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod tasks;

pub use effect::Effect;
pub use event::Event;
pub use reducer::{DispatchResult, WEATHER_ERROR_MESSAGE, reduce};
pub use runtime::Widget;
pub use state::{RequestId, WidgetState};
