// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Render-ready projection of a workout for the list view.

use crate::models::activity::ActivityType;
use crate::models::workout::{Workout, WorkoutId};
use std::fmt;

/// One `(icon, value, unit)` row of a list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// List entry for a single workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub id: WorkoutId,
    pub activity_type: ActivityType,
    pub title: String,
    pub details: Vec<SummaryDetail>,
}

impl WorkoutSummary {
    /// Style class of the entry, e.g. `workout--running`.
    pub fn class_name(&self) -> String {
        format!("workout--{}", self.activity_type)
    }
}

impl From<&Workout> for WorkoutSummary {
    fn from(workout: &Workout) -> Self {
        let profile = workout.profile();
        let details = vec![
            SummaryDetail {
                icon: profile.icon,
                value: workout.distance().to_string(),
                unit: profile.distance_unit,
            },
            SummaryDetail {
                icon: "⏱",
                value: workout.duration().to_string(),
                unit: "min",
            },
            SummaryDetail {
                icon: profile.metric_icon,
                value: format!("{:.1}", workout.metric()),
                unit: profile.metric_unit,
            },
            SummaryDetail {
                icon: profile.extra_icon,
                value: workout.detail().value().to_string(),
                unit: profile.extra_unit,
            },
        ];

        Self {
            id: workout.id().clone(),
            activity_type: workout.activity_type(),
            title: workout.description().to_string(),
            details,
        }
    }
}

impl fmt::Display for WorkoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.title)?;
        for detail in &self.details {
            write!(f, "  {} {} {}", detail.icon, detail.value, detail.unit)?;
        }
        Ok(())
    }
}
