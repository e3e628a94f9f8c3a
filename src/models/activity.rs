// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity types, their per-type rules, and map coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pool length assumed by the swimming pace formula.
pub const POOL_LENGTH: f64 = 50.0;

/// Discriminant selecting which variant, formula and units apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Running,
    Cycling,
    Swimming,
}

/// Static per-type rules: labels, icons, units and the derived metric.
#[derive(Debug)]
pub struct ActivityProfile {
    /// Capitalized name used in descriptions ("Running")
    pub label: &'static str,
    /// Marker and list icon
    pub icon: &'static str,
    /// Unit the distance is entered in
    pub distance_unit: &'static str,
    /// Derived metric from (distance, duration in minutes)
    pub metric: fn(f64, f64) -> f64,
    pub metric_icon: &'static str,
    pub metric_unit: &'static str,
    /// Form field holding the type-specific value
    pub extra_field: InputField,
    pub extra_icon: &'static str,
    pub extra_unit: &'static str,
}

const RUNNING: ActivityProfile = ActivityProfile {
    label: "Running",
    icon: "🏃‍♂️",
    distance_unit: "km",
    metric: running_pace,
    metric_icon: "⚡️",
    metric_unit: "min/km",
    extra_field: InputField::Cadence,
    extra_icon: "🦶🏼",
    extra_unit: "spm",
};

const CYCLING: ActivityProfile = ActivityProfile {
    label: "Cycling",
    icon: "🚴‍♂️",
    distance_unit: "km",
    metric: cycling_speed,
    metric_icon: "⚡️",
    metric_unit: "km/h",
    extra_field: InputField::ElevationGain,
    extra_icon: "⛰",
    extra_unit: "m",
};

const SWIMMING: ActivityProfile = ActivityProfile {
    label: "Swimming",
    icon: "🏊🏻‍♂️",
    distance_unit: "m",
    metric: swimming_pace,
    metric_icon: "🏊🏻‍♀️",
    metric_unit: "m/min",
    extra_field: InputField::Laps,
    extra_icon: "🔁",
    extra_unit: "laps",
};

/// min/km
fn running_pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// km/h
fn cycling_speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// m/min
fn swimming_pace(distance: f64, duration: f64) -> f64 {
    (distance / POOL_LENGTH / duration) * 60.0
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [
        ActivityType::Running,
        ActivityType::Cycling,
        ActivityType::Swimming,
    ];

    pub fn profile(self) -> &'static ActivityProfile {
        match self {
            ActivityType::Running => &RUNNING,
            ActivityType::Cycling => &CYCLING,
            ActivityType::Swimming => &SWIMMING,
        }
    }

    /// Lowercase tag used in storage and style classes.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Running => "running",
            ActivityType::Cycling => "cycling",
            ActivityType::Swimming => "swimming",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown activity type: {0}")]
pub struct UnknownActivityType(pub String);

/// Numeric fields of the workout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Distance,
    Duration,
    Cadence,
    ElevationGain,
    Laps,
}

impl InputField {
    pub fn name(self) -> &'static str {
        match self {
            InputField::Distance => "distance",
            InputField::Duration => "duration",
            InputField::Cadence => "cadence",
            InputField::ElevationGain => "elevation gain",
            InputField::Laps => "laps",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `(latitude, longitude)` pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build coordinates only if both values are finite and in range.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let coords = Self::new(lat, lng);
        coords.is_valid().then_some(coords)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
