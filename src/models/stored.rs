// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Flat workout record as persisted in the key-value store.

use crate::models::activity::{Coordinates, InputField};
use crate::models::workout::{ActivityDetail, Workout, WorkoutId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored workout entry.
///
/// Only base fields and the type-specific input are written. Derived values
/// (pace, speed, description) that older data may carry are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkout {
    pub id: WorkoutId,
    /// Creation time (`date` in data written by the browser app)
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "coords")]
    pub coordinates: Coordinates,
    pub distance: f64,
    pub duration: f64,
    #[serde(default, alias = "clicks")]
    pub interaction_count: u32,
    #[serde(flatten)]
    pub detail: StoredDetail,
}

/// Type-specific field, tagged by `type`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoredDetail {
    Running {
        cadence: u32,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
    },
    Swimming {
        laps: u32,
    },
}

impl From<&Workout> for StoredWorkout {
    fn from(workout: &Workout) -> Self {
        let detail = match workout.detail() {
            ActivityDetail::Running { cadence } => StoredDetail::Running { cadence },
            ActivityDetail::Cycling { elevation_gain } => StoredDetail::Cycling { elevation_gain },
            ActivityDetail::Swimming { laps } => StoredDetail::Swimming { laps },
        };

        Self {
            id: workout.id().clone(),
            created_at: workout.created_at(),
            coordinates: workout.coordinates(),
            distance: workout.distance(),
            duration: workout.duration(),
            interaction_count: workout.interaction_count(),
            detail,
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = StoredWorkoutError;

    /// Dispatch on the stored type and rebuild the workout, recomputing
    /// every derived value.
    fn try_from(stored: StoredWorkout) -> Result<Self, Self::Error> {
        if !stored.coordinates.is_valid() {
            return Err(StoredWorkoutError::InvalidCoordinates);
        }
        require_positive(InputField::Distance, stored.distance)?;
        require_positive(InputField::Duration, stored.duration)?;

        let detail = match stored.detail {
            StoredDetail::Running { cadence } => {
                require_positive(InputField::Cadence, f64::from(cadence))?;
                ActivityDetail::Running { cadence }
            }
            StoredDetail::Cycling { elevation_gain } => {
                if !elevation_gain.is_finite() || elevation_gain < 0.0 {
                    return Err(StoredWorkoutError::InvalidValue(InputField::ElevationGain));
                }
                ActivityDetail::Cycling { elevation_gain }
            }
            StoredDetail::Swimming { laps } => {
                require_positive(InputField::Laps, f64::from(laps))?;
                ActivityDetail::Swimming { laps }
            }
        };

        Ok(Workout::rehydrate(
            stored.id,
            stored.created_at,
            stored.coordinates,
            stored.distance,
            stored.duration,
            detail,
            stored.interaction_count,
        ))
    }
}

fn require_positive(field: InputField, value: f64) -> Result<(), StoredWorkoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StoredWorkoutError::InvalidValue(field))
    }
}

/// Reasons a stored entry cannot be turned back into a workout.
#[derive(Debug, thiserror::Error)]
pub enum StoredWorkoutError {
    #[error("Malformed entry: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid coordinates")]
    InvalidCoordinates,

    #[error("Invalid {0}")]
    InvalidValue(InputField),
}
