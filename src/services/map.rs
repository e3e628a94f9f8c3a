// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map controller.
//!
//! Owns the single map widget, the table of markers per workout id, and the
//! location of the last map click. The widget itself (tiles, panning,
//! drawing) is an external collaborator behind [`MapWidget`].

use crate::models::{Coordinates, Workout, WorkoutId};
use std::collections::HashMap;
use std::time::Duration;

/// Duration of the animated pan to a selected workout.
pub const PAN_DURATION: Duration = Duration::from_secs(1);

const POPUP_MAX_WIDTH: u32 = 250;
const POPUP_MIN_WIDTH: u32 = 100;

/// Callback invoked with the coordinates of each map click.
pub type ClickHandler = Box<dyn FnMut(Coordinates) + Send>;

/// Creates the widget once a center is known.
pub type MapFactory = Box<dyn FnOnce(Coordinates, u8) -> Box<dyn MapWidget>>;

/// Widget-assigned marker handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Popup attached to a workout marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub class_name: String,
    pub content: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl MarkerPopup {
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            class_name: format!("{}-popup", workout.activity_type()),
            content: format!("{} {}", workout.profile().icon, workout.description()),
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// Map-rendering widget primitives.
pub trait MapWidget {
    /// Center the view; `animation` requests a smooth pan of that length.
    fn set_view(&mut self, center: Coordinates, zoom: u8, animation: Option<Duration>);

    /// Register the click callback.
    fn on_click(&mut self, handler: ClickHandler);

    /// Place a marker with an open popup.
    fn add_marker(&mut self, at: Coordinates, popup: MarkerPopup) -> MarkerHandle;

    fn remove_marker(&mut self, marker: MarkerHandle);
}

pub struct MapController {
    factory: Option<MapFactory>,
    widget: Option<Box<dyn MapWidget>>,
    markers: HashMap<WorkoutId, MarkerHandle>,
    pending_click: Option<Coordinates>,
}

impl MapController {
    pub fn new(factory: MapFactory) -> Self {
        Self {
            factory: Some(factory),
            widget: None,
            markers: HashMap::new(),
            pending_click: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    /// Create the widget centered on `center`. Only the first call succeeds.
    pub fn initialize(&mut self, center: Option<Coordinates>, zoom: u8) -> Result<(), MapError> {
        if self.widget.is_some() {
            return Err(MapError::AlreadyInitialized);
        }
        let center = center.ok_or(MapError::Unavailable)?;
        let factory = self.factory.take().ok_or(MapError::AlreadyInitialized)?;

        let mut widget = factory(center, zoom);
        widget.set_view(center, zoom, None);
        tracing::info!(%center, zoom, "Map initialized");

        self.widget = Some(widget);
        Ok(())
    }

    fn widget_mut(&mut self) -> Result<&mut Box<dyn MapWidget>, MapError> {
        self.widget.as_mut().ok_or(MapError::NotInitialized)
    }

    pub fn on_map_clicked(&mut self, handler: ClickHandler) -> Result<(), MapError> {
        self.widget_mut()?.on_click(handler);
        Ok(())
    }

    /// Place the marker for `workout`, replacing any marker it already has.
    pub fn render_marker(&mut self, workout: &Workout) -> Result<(), MapError> {
        let widget = self.widget.as_mut().ok_or(MapError::NotInitialized)?;

        if let Some(previous) = self.markers.remove(workout.id()) {
            widget.remove_marker(previous);
        }
        let handle = widget.add_marker(workout.coordinates(), MarkerPopup::for_workout(workout));
        self.markers.insert(workout.id().clone(), handle);

        tracing::debug!(id = %workout.id(), at = %workout.coordinates(), "Marker rendered");
        Ok(())
    }

    /// Returns `true` if a marker was removed.
    pub fn remove_marker(&mut self, id: &WorkoutId) -> bool {
        let Some(widget) = self.widget.as_mut() else {
            return false;
        };
        match self.markers.remove(id) {
            Some(handle) => {
                widget.remove_marker(handle);
                true
            }
            None => false,
        }
    }

    pub fn clear_markers(&mut self) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        for (_, handle) in self.markers.drain() {
            widget.remove_marker(handle);
        }
    }

    pub fn has_marker(&self, id: &WorkoutId) -> bool {
        self.markers.contains_key(id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Smoothly recenter; does nothing before the map exists.
    pub fn pan_to(&mut self, coordinates: Coordinates, zoom: u8) {
        match self.widget.as_mut() {
            Some(widget) => widget.set_view(coordinates, zoom, Some(PAN_DURATION)),
            None => tracing::debug!(%coordinates, "Pan ignored, map not ready"),
        }
    }

    pub fn set_pending_click(&mut self, coordinates: Coordinates) {
        self.pending_click = Some(coordinates);
    }

    pub fn pending_click(&self) -> Option<Coordinates> {
        self.pending_click
    }

    pub fn clear_pending_click(&mut self) {
        self.pending_click = None;
    }
}

/// Map errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("Map unavailable without a position")]
    Unavailable,

    #[error("Map already initialized")]
    AlreadyInitialized,

    #[error("Map not initialized")]
    NotInitialized,
}
