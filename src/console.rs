// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented console host.
//!
//! Text stand-ins for the map, the form, the workout list and alerts, plus the command
//! reader that turns typed lines into app events. Map clicks go through the
//! handler the app registered with the map, as they would from a real widget.

use crate::app::AppEvent;
use crate::models::activity::UnknownActivityType;
use crate::models::{ActivityType, Coordinates, InputField, WorkoutId, WorkoutSummary};
use crate::services::{
    ClickHandler, FormInput, FormPresentation, MapWidget, MarkerHandle, MarkerPopup,
};
use crate::views::{FormView, Notifier, WorkoutList};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

pub const USAGE: &str = "\
commands:
  click <lat> <lng>
  type <running|cycling|swimming>
  submit <type> <distance> <duration> <cadence|elevation|laps>
  select <id>
  delete <id>
  reset
  help
  quit";

fn emit(out: &mut impl Write, line: std::fmt::Arguments<'_>) {
    if let Err(e) = out.write_fmt(line).and_then(|()| out.write_all(b"\n")) {
        tracing::warn!(error = %e, "Console write failed");
    }
}

/// Shared slot for the map's click handler.
///
/// The map widget fills it in when the app registers its handler; the
/// command reader fires it for `click` commands.
#[derive(Clone, Default)]
pub struct ClickRelay(Arc<Mutex<Option<ClickHandler>>>);

impl ClickRelay {
    fn register(&self, handler: ClickHandler) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(handler);
        }
    }

    /// Fire the registered handler. Returns `false` when there is none yet.
    pub fn click(&self, at: Coordinates) -> bool {
        let Ok(mut slot) = self.0.lock() else {
            return false;
        };
        match slot.as_mut() {
            Some(handler) => {
                handler(at);
                true
            }
            None => false,
        }
    }
}

/// Map widget that prints what it would draw.
pub struct ConsoleMap<W> {
    out: W,
    relay: ClickRelay,
    next_marker: u64,
}

impl<W: Write> ConsoleMap<W> {
    pub fn new(out: W, relay: ClickRelay) -> Self {
        Self {
            out,
            relay,
            next_marker: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MapWidget for ConsoleMap<W> {
    fn set_view(&mut self, center: Coordinates, zoom: u8, animation: Option<Duration>) {
        match animation {
            Some(pan) => emit(
                &mut self.out,
                format_args!("map: pan to {center} zoom {zoom} over {}ms", pan.as_millis()),
            ),
            None => emit(&mut self.out, format_args!("map: view {center} zoom {zoom}")),
        }
    }

    fn on_click(&mut self, handler: ClickHandler) {
        self.relay.register(handler);
    }

    fn add_marker(&mut self, at: Coordinates, popup: MarkerPopup) -> MarkerHandle {
        self.next_marker += 1;
        emit(
            &mut self.out,
            format_args!("map: marker #{} at {at} {}", self.next_marker, popup.content),
        );
        MarkerHandle(self.next_marker)
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        emit(&mut self.out, format_args!("map: marker #{} removed", marker.0));
    }
}

/// Form state changes, one line each.
pub struct ConsoleForm<W> {
    out: W,
}

impl<W: Write> ConsoleForm<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FormView for ConsoleForm<W> {
    fn open(&mut self, at: Coordinates, presentation: FormPresentation) {
        match presentation {
            FormPresentation::Shown => emit(&mut self.out, format_args!("form: open at {at}")),
            FormPresentation::CoolingDown => emit(
                &mut self.out,
                format_args!("form: opening at {at} after cool-down"),
            ),
            FormPresentation::Hidden => {}
        }
    }

    fn select_type(&mut self, activity_type: ActivityType, extra: InputField) {
        emit(
            &mut self.out,
            format_args!("form: {activity_type} selected, enter {extra}"),
        );
    }

    fn close(&mut self) {
        emit(&mut self.out, format_args!("form: closed"));
    }
}

/// Workout list printed one entry per line.
pub struct ConsoleList<W> {
    out: W,
}

impl<W: Write> ConsoleList<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WorkoutList for ConsoleList<W> {
    fn render_entry(&mut self, entry: &WorkoutSummary) {
        emit(&mut self.out, format_args!("list: {entry}"));
    }

    fn remove_entry(&mut self, id: &WorkoutId) {
        emit(&mut self.out, format_args!("list: [{id}] removed"));
    }

    fn clear(&mut self) {
        emit(&mut self.out, format_args!("list: cleared"));
    }
}

pub struct ConsoleNotifier<W> {
    out: W,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn alert(&mut self, message: &str) {
        emit(&mut self.out, format_args!("alert: {message}"));
    }
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Click(Coordinates),
    Type(ActivityType),
    Submit(FormInput),
    Select(WorkoutId),
    Delete(WorkoutId),
    Reset,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// The app event for this command. Clicks and help are handled locally.
    pub fn into_event(self) -> Option<AppEvent> {
        match self {
            ConsoleCommand::Type(activity_type) => Some(AppEvent::TypeSelected(activity_type)),
            ConsoleCommand::Submit(input) => Some(AppEvent::FormSubmitted(input)),
            ConsoleCommand::Select(id) => Some(AppEvent::WorkoutSelected(id)),
            ConsoleCommand::Delete(id) => Some(AppEvent::WorkoutDeleted(id)),
            ConsoleCommand::Reset => Some(AppEvent::Reset),
            ConsoleCommand::Quit => Some(AppEvent::Quit),
            ConsoleCommand::Click(_) | ConsoleCommand::Help => None,
        }
    }
}

impl FromStr for ConsoleCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match (command.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("click", [lat, lng]) => {
                let (Ok(lat), Ok(lng)) = (lat.parse::<f64>(), lng.parse::<f64>()) else {
                    return Err(CommandError::InvalidCoordinates);
                };
                Coordinates::checked(lat, lng)
                    .map(ConsoleCommand::Click)
                    .ok_or(CommandError::InvalidCoordinates)
            }
            ("click", _) => Err(CommandError::Usage("click <lat> <lng>")),
            ("type", [kind]) => Ok(ConsoleCommand::Type(kind.parse()?)),
            ("type", _) => Err(CommandError::Usage("type <running|cycling|swimming>")),
            // Missing values are left empty for the form to reject
            ("submit", [kind, values @ ..]) if values.len() <= 3 => {
                let value = |i: usize| values.get(i).copied().unwrap_or_default();
                Ok(ConsoleCommand::Submit(FormInput::new(
                    kind.parse()?,
                    value(0),
                    value(1),
                    value(2),
                )))
            }
            ("submit", _) => Err(CommandError::Usage(
                "submit <type> <distance> <duration> <cadence|elevation|laps>",
            )),
            ("select", [id]) => Ok(ConsoleCommand::Select(WorkoutId::from(*id))),
            ("select", _) => Err(CommandError::Usage("select <id>")),
            ("delete", [id]) => Ok(ConsoleCommand::Delete(WorkoutId::from(*id))),
            ("delete", _) => Err(CommandError::Usage("delete <id>")),
            ("reset", []) => Ok(ConsoleCommand::Reset),
            ("help", _) => Ok(ConsoleCommand::Help),
            ("quit" | "exit", []) => Ok(ConsoleCommand::Quit),
            _ => Err(CommandError::Unknown(command.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Coordinates must be a latitude in [-90, 90] and a longitude in [-180, 180]")]
    InvalidCoordinates,

    #[error(transparent)]
    UnknownType(#[from] UnknownActivityType),
}

/// Read commands until end of input or `quit`, forwarding them to the app.
///
/// End of input counts as `quit`.
pub fn read_commands<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    relay: &ClickRelay,
    events: &UnboundedSender<AppEvent>,
) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read command");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                emit(&mut out, format_args!("error: {e}"));
                continue;
            }
        };

        match command {
            ConsoleCommand::Click(at) => {
                if !relay.click(at) {
                    emit(&mut out, format_args!("error: the map is not ready yet"));
                }
            }
            ConsoleCommand::Help => emit(&mut out, format_args!("{USAGE}")),
            command => {
                let quit = command == ConsoleCommand::Quit;
                let Some(event) = command.into_event() else {
                    continue;
                };
                if events.send(event).is_err() || quit {
                    return;
                }
            }
        }
    }

    // The app may already be gone
    let _ = events.send(AppEvent::Quit);
}
