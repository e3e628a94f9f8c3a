// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout record: base fields, per-type payload and derived metrics.

use crate::models::activity::{ActivityProfile, ActivityType, Coordinates};
use crate::time_utils::local_month_day;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ids keep the last ten digits of the creation time in epoch milliseconds.
const ID_MODULUS: i64 = 10_000_000_000;

/// Workout identifier derived from its creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn from_timestamp(created_at: DateTime<Utc>) -> Self {
        let millis = created_at.timestamp_millis().rem_euclid(ID_MODULUS);
        Self(format!("{millis:010}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type-specific input of a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityDetail {
    /// Steps per minute
    Running { cadence: u32 },
    /// Meters climbed
    Cycling { elevation_gain: f64 },
    /// Pool lengths swum
    Swimming { laps: u32 },
}

impl ActivityDetail {
    pub fn activity_type(&self) -> ActivityType {
        match self {
            ActivityDetail::Running { .. } => ActivityType::Running,
            ActivityDetail::Cycling { .. } => ActivityType::Cycling,
            ActivityDetail::Swimming { .. } => ActivityType::Swimming,
        }
    }

    /// The type-specific value as a plain number.
    pub fn value(&self) -> f64 {
        match *self {
            ActivityDetail::Running { cadence } => f64::from(cadence),
            ActivityDetail::Cycling { elevation_gain } => elevation_gain,
            ActivityDetail::Swimming { laps } => f64::from(laps),
        }
    }
}

/// One logged workout.
///
/// All fields except the interaction count are fixed at construction. The
/// derived metric and description are computed by a single code path shared
/// by fresh creation and rehydration from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    detail: ActivityDetail,
    metric: f64,
    description: String,
    interaction_count: u32,
}

impl Workout {
    /// Create a new workout from validated input.
    pub fn new(
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        detail: ActivityDetail,
    ) -> Self {
        Self::rehydrate(
            WorkoutId::from_timestamp(created_at),
            created_at,
            coordinates,
            distance,
            duration,
            detail,
            0,
        )
    }

    /// Rebuild a workout from persisted base fields.
    pub fn rehydrate(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        detail: ActivityDetail,
        interaction_count: u32,
    ) -> Self {
        let profile = detail.activity_type().profile();
        Self {
            id,
            created_at,
            coordinates,
            distance,
            duration,
            detail,
            metric: (profile.metric)(distance, duration),
            description: format!("{} on {}", profile.label, local_month_day(created_at)),
            interaction_count,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn activity_type(&self) -> ActivityType {
        self.detail.activity_type()
    }

    pub fn profile(&self) -> &'static ActivityProfile {
        self.activity_type().profile()
    }

    pub fn detail(&self) -> ActivityDetail {
        self.detail
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    /// Pace or speed, depending on the activity type.
    pub fn metric(&self) -> f64 {
        self.metric
    }

    /// min/km for running, m/min for swimming.
    pub fn pace(&self) -> Option<f64> {
        match self.detail {
            ActivityDetail::Running { .. } | ActivityDetail::Swimming { .. } => Some(self.metric),
            ActivityDetail::Cycling { .. } => None,
        }
    }

    /// km/h, cycling only.
    pub fn speed(&self) -> Option<f64> {
        match self.detail {
            ActivityDetail::Cycling { .. } => Some(self.metric),
            _ => None,
        }
    }

    pub fn record_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }
}
