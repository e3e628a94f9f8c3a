// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering surfaces outside the map: the workout form, the workout list
//! and user alerts.

use crate::models::{ActivityType, Coordinates, InputField, WorkoutId, WorkoutSummary};
use crate::services::FormPresentation;

/// The workout entry form.
pub trait FormView {
    /// Present the form for a click at `at`.
    ///
    /// `CoolingDown` means the form was closed moments ago and should only
    /// appear once the cool-down has passed.
    fn open(&mut self, at: Coordinates, presentation: FormPresentation);

    /// Switch the type-specific field to `extra`.
    fn select_type(&mut self, activity_type: ActivityType, extra: InputField);

    fn close(&mut self);
}

/// Sidebar list of workouts.
pub trait WorkoutList {
    /// Show a new entry at the top of the list.
    fn render_entry(&mut self, entry: &WorkoutSummary);

    fn remove_entry(&mut self, id: &WorkoutId);

    /// Drop every entry.
    fn clear(&mut self);
}

/// User-facing error reports.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}
