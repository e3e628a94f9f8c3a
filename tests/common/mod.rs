// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use mapty::config::Config;
use mapty::db::{KeyValueStore, MemoryStore, StorageError};
use mapty::models::{ActivityType, Coordinates, InputField, WorkoutId, WorkoutSummary};
use mapty::services::{ClickHandler, FormPresentation, MapWidget, MarkerHandle, MarkerPopup};
use mapty::views::{FormView, Notifier, WorkoutList};
use mapty::{AppController, Surfaces};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Everything the fake map widget was asked to do.
#[derive(Default)]
pub struct MapLog {
    pub views: Vec<(Coordinates, u8, Option<Duration>)>,
    pub markers: Vec<(MarkerHandle, Coordinates, MarkerPopup)>,
    pub removed: Vec<MarkerHandle>,
    pub click: Option<ClickHandler>,
}

impl MapLog {
    /// Markers added and not removed since, in insertion order.
    #[allow(dead_code)]
    pub fn live_markers(&self) -> Vec<(Coordinates, MarkerPopup)> {
        self.markers
            .iter()
            .filter(|(handle, _, _)| !self.removed.contains(handle))
            .map(|(_, at, popup)| (*at, popup.clone()))
            .collect()
    }
}

pub struct RecordingMap {
    log: Rc<RefCell<MapLog>>,
    next: u64,
}

impl MapWidget for RecordingMap {
    fn set_view(&mut self, center: Coordinates, zoom: u8, animation: Option<Duration>) {
        self.log.borrow_mut().views.push((center, zoom, animation));
    }

    fn on_click(&mut self, handler: ClickHandler) {
        self.log.borrow_mut().click = Some(handler);
    }

    fn add_marker(&mut self, at: Coordinates, popup: MarkerPopup) -> MarkerHandle {
        self.next += 1;
        let handle = MarkerHandle(self.next);
        self.log.borrow_mut().markers.push((handle, at, popup));
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.log.borrow_mut().removed.push(marker);
    }
}

/// What the form surface was asked to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormEvent {
    Opened(Coordinates, FormPresentation),
    TypeSelected(ActivityType, InputField),
    Closed,
}

pub struct RecordingForm(Rc<RefCell<Vec<FormEvent>>>);

impl FormView for RecordingForm {
    fn open(&mut self, at: Coordinates, presentation: FormPresentation) {
        self.0.borrow_mut().push(FormEvent::Opened(at, presentation));
    }

    fn select_type(&mut self, activity_type: ActivityType, extra: InputField) {
        self.0
            .borrow_mut()
            .push(FormEvent::TypeSelected(activity_type, extra));
    }

    fn close(&mut self) {
        self.0.borrow_mut().push(FormEvent::Closed);
    }
}

/// List view state: newest entry first.
#[derive(Default)]
pub struct ListLog {
    pub entries: Vec<WorkoutSummary>,
    pub clears: usize,
}

pub struct RecordingList(Rc<RefCell<ListLog>>);

impl WorkoutList for RecordingList {
    fn render_entry(&mut self, entry: &WorkoutSummary) {
        self.0.borrow_mut().entries.insert(0, entry.clone());
    }

    fn remove_entry(&mut self, id: &WorkoutId) {
        self.0.borrow_mut().entries.retain(|e| &e.id != id);
    }

    fn clear(&mut self) {
        let mut log = self.0.borrow_mut();
        log.entries.clear();
        log.clears += 1;
    }
}

pub struct RecordingNotifier(Rc<RefCell<Vec<String>>>);

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

/// Backend whose every operation fails.
#[allow(dead_code)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::read(key, "disk on fire"))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::write(key, "disk on fire"))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::write(key, "disk on fire"))
    }
}

/// First timestamp handed out by the test clock.
#[allow(dead_code)]
pub fn clock_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap()
}

/// App wired to recording surfaces.
pub struct Harness {
    pub app: AppController,
    pub map: Rc<RefCell<MapLog>>,
    pub form: Rc<RefCell<Vec<FormEvent>>>,
    pub list: Rc<RefCell<ListLog>>,
    pub alerts: Rc<RefCell<Vec<String>>>,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with_backend(Box::new(MemoryStore::new()))
    }

    /// Clock starts at [`clock_start`] and moves one minute per workout.
    pub fn with_backend(backend: Box<dyn KeyValueStore>) -> Self {
        let map = Rc::new(RefCell::new(MapLog::default()));
        let form = Rc::new(RefCell::new(Vec::new()));
        let list = Rc::new(RefCell::new(ListLog::default()));
        let alerts = Rc::new(RefCell::new(Vec::new()));

        let widget_log = map.clone();
        let surfaces = Surfaces {
            map: Box::new(move |_, _| {
                Box::new(RecordingMap {
                    log: widget_log,
                    next: 0,
                }) as Box<dyn MapWidget>
            }),
            form: Box::new(RecordingForm(form.clone())),
            list: Box::new(RecordingList(list.clone())),
            notifier: Box::new(RecordingNotifier(alerts.clone())),
        };

        let tick = Cell::new(0);
        let app = AppController::new(Config::default(), backend, surfaces).with_clock(move || {
            let minutes = tick.get();
            tick.set(minutes + 1);
            clock_start() + ChronoDuration::minutes(minutes)
        });

        Self {
            app,
            map,
            form,
            list,
            alerts,
        }
    }

    /// Resolve geolocation at `at`.
    pub fn locate(&mut self, at: Coordinates) {
        self.app.on_position(Ok(at)).unwrap();
    }

    /// Click the map through the handler the app registered, then let the
    /// app handle the queued event.
    pub fn click(&mut self, at: Coordinates) -> bool {
        let clicked = match self.map.borrow_mut().click.as_mut() {
            Some(handler) => {
                handler(at);
                true
            }
            None => false,
        };
        self.app.process_pending();
        clicked
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}
