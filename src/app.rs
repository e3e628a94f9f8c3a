// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application controller.
//!
//! Owns the authoritative workout list and drives the other components:
//! geolocation makes the map ready, map clicks open the form, submissions
//! become workouts, and every change to the list is persisted.
//!
//! UI events are queued on an unbounded channel and handled one at a time
//! on the controller's task.

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::{ActivityType, Coordinates, Workout, WorkoutId, WorkoutSummary};
use crate::services::{
    FormController, FormInput, GeolocationError, Geolocator, MapController, MapError,
    MapFactory, ValidationError, WorkoutStore,
};
use crate::time_utils::format_utc_rfc3339;
use crate::views::{FormView, Notifier, WorkoutList};
use chrono::{DateTime, Utc};
use std::ops::ControlFlow;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A user interaction, queued for the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    MapClicked(Coordinates),
    TypeSelected(ActivityType),
    FormSubmitted(FormInput),
    WorkoutSelected(WorkoutId),
    WorkoutDeleted(WorkoutId),
    Reset,
    Quit,
}

/// Rendering surfaces supplied by the host.
pub struct Surfaces {
    pub map: MapFactory,
    pub form: Box<dyn FormView>,
    pub list: Box<dyn WorkoutList>,
    pub notifier: Box<dyn Notifier>,
}

/// Source of creation timestamps.
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Position {
    Pending,
    Located(Coordinates),
    Failed,
}

pub struct AppController {
    config: Config,
    workouts: Vec<Workout>,
    store: WorkoutStore,
    map: MapController,
    form: FormController,
    form_view: Box<dyn FormView>,
    list: Box<dyn WorkoutList>,
    notifier: Box<dyn Notifier>,
    position: Position,
    clock: Clock,
    last_created: Option<DateTime<Utc>>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl AppController {
    /// Load stored workouts and list them. Markers wait for the map.
    pub fn new(config: Config, backend: Box<dyn KeyValueStore>, surfaces: Surfaces) -> Self {
        let mut store = WorkoutStore::new(backend, config.storage_key.clone());
        let workouts = store.load();

        let mut list = surfaces.list;
        for workout in &workouts {
            list.render_entry(&WorkoutSummary::from(workout));
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let form = FormController::new(config.form_cooldown);

        Self {
            workouts,
            store,
            map: MapController::new(surfaces.map),
            form,
            form_view: surfaces.form,
            list,
            notifier: surfaces.notifier,
            position: Position::Pending,
            clock: Box::new(Utc::now),
            last_created: None,
            events_tx,
            events_rx,
            config,
        }
    }

    /// Replace the timestamp source used for new workouts.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Handle for queueing events from the host.
    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.events_tx.clone()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn workout(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn map(&self) -> &MapController {
        &self.map
    }

    pub fn is_map_ready(&self) -> bool {
        self.map.is_initialized()
    }

    /// The resolved position, once geolocation succeeded.
    pub fn position(&self) -> Option<Coordinates> {
        match self.position {
            Position::Located(at) => Some(at),
            Position::Pending | Position::Failed => None,
        }
    }

    /// Wait for the position and bring up the map.
    pub async fn start<G: Geolocator>(&mut self, geolocator: &G) -> Result<()> {
        let result = geolocator.current_position().await;
        self.on_position(result)
    }

    /// Run the session: geolocation and queued events until `Quit`.
    pub async fn run<G: Geolocator>(&mut self, geolocator: &G) {
        let position = geolocator.current_position();
        tokio::pin!(position);
        let mut located = false;

        loop {
            tokio::select! {
                // Map readiness goes ahead of queued events
                biased;

                result = &mut position, if !located => {
                    located = true;
                    // Failures are already reported to the user
                    let _ = self.on_position(result);
                }
                Some(event) = self.events_rx.recv() => {
                    if self.dispatch(event).is_break() {
                        break;
                    }
                }
                else => break,
            }
        }

        tracing::info!(workouts = self.workouts.len(), "Session ended");
    }

    /// Handle every queued event without waiting. Returns how many ran.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            handled += 1;
            if self.dispatch(event).is_break() {
                break;
            }
        }
        handled
    }

    /// Handle one event. `Break` means the session should end.
    pub fn dispatch(&mut self, event: AppEvent) -> ControlFlow<()> {
        tracing::debug!(?event, "Dispatching event");
        match event {
            AppEvent::MapClicked(at) => self.on_map_clicked(at),
            AppEvent::TypeSelected(activity_type) => self.on_type_selected(activity_type),
            AppEvent::FormSubmitted(input) => {
                // Reported inside the handler
                let _ = self.on_form_submitted(input);
            }
            AppEvent::WorkoutSelected(id) => {
                self.on_workout_selected(&id);
            }
            AppEvent::WorkoutDeleted(id) => {
                self.on_workout_deleted(&id);
            }
            AppEvent::Reset => self.reset(),
            AppEvent::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Apply the outcome of the position request. Only the first outcome counts.
    pub fn on_position(
        &mut self,
        result: std::result::Result<Coordinates, GeolocationError>,
    ) -> Result<()> {
        if self.position != Position::Pending {
            tracing::warn!("Position resolved twice, ignoring");
            return Ok(());
        }

        let center = match result {
            Ok(center) => center,
            Err(e) => {
                self.position = Position::Failed;
                let err = AppError::from(e);
                self.report(&err);
                return Err(err);
            }
        };
        self.position = Position::Located(center);

        if let Err(e) = self.show_map(center) {
            let err = AppError::from(e);
            self.report(&err);
            return Err(err);
        }
        Ok(())
    }

    fn show_map(&mut self, center: Coordinates) -> std::result::Result<(), MapError> {
        self.map.initialize(Some(center), self.config.zoom_level)?;

        let events = self.events_tx.clone();
        self.map.on_map_clicked(Box::new(move |at| {
            // The receiver lives as long as the controller
            let _ = events.send(AppEvent::MapClicked(at));
        }))?;

        for workout in &self.workouts {
            self.map.render_marker(workout)?;
        }
        tracing::info!(markers = self.map.marker_count(), "Map ready");
        Ok(())
    }

    /// Open the form at the clicked location.
    pub fn on_map_clicked(&mut self, at: Coordinates) {
        if !self.map.is_initialized() {
            tracing::debug!(%at, "Click ignored, map not ready");
            return;
        }
        self.map.set_pending_click(at);
        self.form.show(at);
        let presentation = self.form.presentation(Instant::now());
        self.form_view.open(at, presentation);
    }

    pub fn on_type_selected(&mut self, activity_type: ActivityType) {
        self.form.select_type(activity_type);
        self.form_view
            .select_type(activity_type, self.form.active_extra_field());
    }

    /// Turn a form submission into a workout.
    ///
    /// On failure the form stays open with the entered values.
    pub fn on_form_submitted(&mut self, input: FormInput) -> Result<WorkoutId> {
        self.form.enter(&input);
        match self.create_workout(input.activity_type) {
            Ok(id) => Ok(id),
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    fn create_workout(&mut self, activity_type: ActivityType) -> Result<WorkoutId> {
        // Field errors are reported before a missing location
        let input = self.form.validate_and_extract(activity_type)?;
        let location = self
            .map
            .pending_click()
            .ok_or(ValidationError::NoLocation)?;

        let created_at = self.next_timestamp();
        let workout = Workout::new(
            created_at,
            location,
            input.distance,
            input.duration,
            input.detail,
        );
        let id = workout.id().clone();

        if let Err(e) = self.map.render_marker(&workout) {
            tracing::warn!(%id, error = %e, "Marker not rendered");
        }
        self.list.render_entry(&WorkoutSummary::from(&workout));
        self.workouts.push(workout);

        self.close_form();
        self.map.clear_pending_click();
        self.store.save(&self.workouts);

        tracing::info!(
            %id,
            activity_type = %activity_type,
            created_at = %format_utc_rfc3339(created_at),
            "Workout created"
        );
        Ok(id)
    }

    /// Timestamp for a new workout whose id collides with no other.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let one_ms = chrono::Duration::milliseconds(1);
        let mut created_at = (self.clock)();

        if let Some(last) = self.last_created {
            if created_at.timestamp_millis() <= last.timestamp_millis() {
                created_at = last + one_ms;
            }
        }
        while self.workout(&WorkoutId::from_timestamp(created_at)).is_some() {
            created_at += one_ms;
        }

        self.last_created = Some(created_at);
        created_at
    }

    /// Pan to a workout and count the interaction. Returns `false` for unknown ids.
    pub fn on_workout_selected(&mut self, id: &WorkoutId) -> bool {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id() == id) else {
            tracing::debug!(%id, "Selected workout not found");
            return false;
        };

        workout.record_interaction();
        let at = workout.coordinates();
        self.map.pan_to(at, self.config.zoom_level);
        self.store.save(&self.workouts);
        true
    }

    /// Remove one workout with its marker and list entry. Returns `false` for unknown ids.
    pub fn on_workout_deleted(&mut self, id: &WorkoutId) -> bool {
        let Some(index) = self.workouts.iter().position(|w| w.id() == id) else {
            tracing::debug!(%id, "Deleted workout not found");
            return false;
        };

        self.workouts.remove(index);
        self.map.remove_marker(id);
        self.list.remove_entry(id);
        self.store.save(&self.workouts);

        tracing::info!(%id, remaining = self.workouts.len(), "Workout deleted");
        true
    }

    /// Drop every workout, stored and displayed.
    pub fn reset(&mut self) {
        self.store.clear();
        self.workouts.clear();
        self.map.clear_markers();
        self.map.clear_pending_click();
        self.list.clear();
        self.close_form();
        tracing::info!("Workouts reset");
    }

    /// Hide the form, starting its cool-down.
    fn close_form(&mut self) {
        let was_visible = self.form.is_visible();
        self.form.hide(Instant::now());
        if was_visible {
            self.form_view.close();
        }
    }

    fn report(&mut self, err: &AppError) {
        tracing::warn!(error = %err, "Reporting error to user");
        self.notifier.alert(&err.user_message());
    }
}
