use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::{config::WidgetSettings, provider::WeatherProvider};

use super::{
    effect::Effect,
    event::Event,
    reducer::reduce,
    state::WidgetState,
    tasks::{TaskKey, TaskManager},
};

const TASK_PANICKED: &str = "provider task panicked";

/// Owns the widget state and runs the reducer's effects as tokio tasks.
///
/// Must be used from within a tokio runtime. Dropping the widget aborts every
/// fetch it started.
#[derive(Debug)]
pub struct Widget {
    state: WidgetState,
    provider: Arc<dyn WeatherProvider>,
    reveal_delay: Duration,
    tasks: TaskManager<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
}

impl Widget {
    pub fn new(provider: Arc<dyn WeatherProvider>, settings: &WidgetSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            state: WidgetState::new(),
            provider,
            reveal_delay: settings.reveal_delay(),
            tasks: TaskManager::new(events_tx),
            events_rx,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Reduce `event` and start the resulting effects. Returns whether the view changed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        debug!(event = event.name(), "dispatch");

        let result = reduce(&mut self.state, event);
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.changed
    }

    /// Wait for the next task result and dispatch it.
    ///
    /// Returns `None` if no task can ever report back. Cancel-safe.
    pub async fn step(&mut self) -> Option<bool> {
        let event = self.events_rx.recv().await?;
        Some(self.dispatch(event))
    }

    /// Process task results until no fetch or guard release is outstanding.
    pub async fn settle(&mut self) {
        while self.state.is_busy() {
            if self.step().await.is_none() {
                break;
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SearchLocations { request, query } => {
                let provider = Arc::clone(&self.provider);
                let on_panic =
                    Event::SuggestionsDidError { request, message: TASK_PANICKED.to_string() };
                let search = async move {
                    match provider.search_locations(&query).await {
                        Ok(suggestions) => Event::SuggestionsDidLoad { request, suggestions },
                        Err(e) => Event::SuggestionsDidError { request, message: e.to_string() },
                    }
                };
                self.tasks.spawn(TaskKey::Search, search, on_panic);
            }
            Effect::CancelSearch => self.tasks.cancel(TaskKey::Search),
            Effect::FetchWeather { request, city } => {
                let provider = Arc::clone(&self.provider);
                let delay = self.reveal_delay;
                let on_panic =
                    Event::WeatherDidError { request, message: TASK_PANICKED.to_string() };
                let fetch = async move {
                    match provider.current_conditions(&city).await {
                        Ok(snapshot) => {
                            tokio::time::sleep(delay).await;
                            Event::WeatherDidLoad { request, snapshot }
                        }
                        Err(e) => Event::WeatherDidError { request, message: e.to_string() },
                    }
                };
                self.tasks.spawn(TaskKey::Weather, fetch, on_panic);
            }
            Effect::ReleaseSelectionGuard => {
                let release = async {
                    tokio::task::yield_now().await;
                    Event::SelectionGuardReleased
                };
                self.tasks.spawn(TaskKey::SelectionGuard, release, Event::SelectionGuardReleased);
            }
        }
    }
}
