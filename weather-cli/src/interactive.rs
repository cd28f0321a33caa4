//! Prompt-driven front-end for the search widget.

use std::io::{self, Write};
use std::time::Duration;

use inquire::{InquireError, Select, Text};
use tracing::debug;
use weather_core::{
    Event, Widget,
    view::{self, View},
};

const SPINNER_TICK: Duration = Duration::from_millis(80);

/// Query → suggestions → selection → card, until the user leaves with an empty query or Esc.
pub async fn run(mut widget: Widget, initial_query: Option<String>) -> anyhow::Result<()> {
    println!("{}", view::TITLE);

    let mut pending = initial_query;
    loop {
        let query = match pending.take() {
            Some(query) => query,
            None => match prompt_query(&view::render(widget.state()))? {
                Some(query) => query,
                None => break,
            },
        };
        if query.trim().is_empty() {
            break;
        }

        widget.dispatch(Event::QueryChanged(query));
        widget.settle().await;
        trace_view(&widget);

        let choices = view::render(widget.state()).suggestions;
        if choices.is_empty() {
            println!("No matching locations.");
            continue;
        }

        let picked = skippable(Select::new("Pick a location:", choices).raw_prompt())?;
        let Some(suggestion) =
            picked.and_then(|choice| widget.state().suggestions.get(choice.index).cloned())
        else {
            continue;
        };

        widget.dispatch(Event::SuggestionSelected(suggestion));
        wait_for_weather(&mut widget).await;
        trace_view(&widget);

        print_outcome(&view::render(widget.state()));
    }

    Ok(())
}

/// Drive the widget until the weather fetch resolves, animating a spinner on stderr.
pub async fn wait_for_weather(widget: &mut Widget) {
    let mut ticker = tokio::time::interval(SPINNER_TICK);
    let mut tick = 0usize;
    let mut drawn = false;

    while view::render(widget.state()).spinner {
        tokio::select! {
            _ = ticker.tick() => {
                eprint!("\r{} Loading weather...", view::spinner_frame(tick));
                let _ = io::stderr().flush();
                tick += 1;
                drawn = true;
            }
            stepped = widget.step() => {
                if stepped.is_none() {
                    break;
                }
            }
        }
    }

    if drawn {
        eprint!("\r\x1b[2K");
        let _ = io::stderr().flush();
    }

    widget.settle().await;
}

fn prompt_query(view: &View) -> anyhow::Result<Option<String>> {
    let initial = if view.input_is_placeholder { "" } else { view.input.as_str() };

    let prompt =
        Text::new("City:").with_placeholder(view::PLACEHOLDER).with_initial_value(initial);

    skippable(prompt.prompt())
}

/// Treat Esc and Ctrl-C as "no answer" instead of an error.
fn skippable<T>(answer: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn print_outcome(view: &View) {
    if let Some(error) = &view.error {
        eprintln!("{error}");
    }
    if let Some(card) = &view.card {
        println!();
        print!("{card}");
        println!();
    }
}

fn trace_view(widget: &Widget) {
    debug!("view:\n{}", view::render(widget.state()));
}
