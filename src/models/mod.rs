// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod stored;
pub mod summary;
pub mod workout;

pub use activity::{ActivityProfile, ActivityType, Coordinates, InputField};
pub use stored::{StoredDetail, StoredWorkout, StoredWorkoutError};
pub use summary::{SummaryDetail, WorkoutSummary};
pub use workout::{ActivityDetail, Workout, WorkoutId};
