// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form state and input validation.
//!
//! The form is either hidden or visible. Independently, it remembers the
//! selected activity type, which decides the one type-specific field that
//! is active (cadence, elevation gain or laps). Hiding clears every value
//! and starts a short cool-down before the form is presented again.

use crate::models::{ActivityDetail, ActivityType, Coordinates, InputField};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    Visible,
}

/// What the user currently sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPresentation {
    Hidden,
    /// Opened again before the cool-down ran out
    CoolingDown,
    Shown,
}

/// Raw values of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub activity_type: ActivityType,
    pub distance: String,
    pub duration: String,
    /// Cadence, elevation gain or laps, depending on the type
    pub extra: String,
}

impl FormInput {
    pub fn new(
        activity_type: ActivityType,
        distance: impl Into<String>,
        duration: impl Into<String>,
        extra: impl Into<String>,
    ) -> Self {
        Self {
            activity_type,
            distance: distance.into(),
            duration: duration.into(),
            extra: extra.into(),
        }
    }
}

/// Checked input, ready for workout construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub distance: f64,
    pub duration: f64,
    pub detail: ActivityDetail,
}

#[derive(Debug, Default, Clone)]
struct FormValues {
    distance: String,
    duration: String,
    cadence: String,
    elevation_gain: String,
    laps: String,
}

impl FormValues {
    fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Distance => &self.distance,
            InputField::Duration => &self.duration,
            InputField::Cadence => &self.cadence,
            InputField::ElevationGain => &self.elevation_gain,
            InputField::Laps => &self.laps,
        }
    }

    fn get_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Distance => &mut self.distance,
            InputField::Duration => &mut self.duration,
            InputField::Cadence => &mut self.cadence,
            InputField::ElevationGain => &mut self.elevation_gain,
            InputField::Laps => &mut self.laps,
        }
    }
}

pub struct FormController {
    state: FormState,
    activity_type: ActivityType,
    location: Option<Coordinates>,
    values: FormValues,
    focus: Option<InputField>,
    cooldown: Duration,
    hidden_at: Option<Instant>,
}

impl FormController {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            state: FormState::Hidden,
            activity_type: ActivityType::Running,
            location: None,
            values: FormValues::default(),
            focus: None,
            cooldown,
            hidden_at: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == FormState::Visible
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    /// Map location the form was opened for.
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn focused(&self) -> Option<InputField> {
        self.focus
    }

    /// Open the form for `location` and focus the distance field.
    pub fn show(&mut self, location: Coordinates) {
        self.state = FormState::Visible;
        self.location = Some(location);
        self.focus = Some(InputField::Distance);
    }

    /// Clear all values and hide the form.
    pub fn hide(&mut self, now: Instant) {
        self.values = FormValues::default();
        self.state = FormState::Hidden;
        self.location = None;
        self.focus = None;
        self.hidden_at = Some(now);
    }

    pub fn presentation(&self, now: Instant) -> FormPresentation {
        match (self.state, self.hidden_at) {
            (FormState::Hidden, _) => FormPresentation::Hidden,
            (FormState::Visible, Some(hidden_at))
                if now.saturating_duration_since(hidden_at) < self.cooldown =>
            {
                FormPresentation::CoolingDown
            }
            (FormState::Visible, _) => FormPresentation::Shown,
        }
    }

    pub fn select_type(&mut self, activity_type: ActivityType) {
        if self.activity_type != activity_type {
            tracing::debug!(from = %self.activity_type, to = %activity_type, "Form type changed");
        }
        self.activity_type = activity_type;
    }

    /// The type-specific field matching the selected type.
    pub fn active_extra_field(&self) -> InputField {
        self.activity_type.profile().extra_field
    }

    /// Distance and duration are always active; of the type-specific
    /// fields only the one for the selected type is.
    pub fn is_field_active(&self, field: InputField) -> bool {
        match field {
            InputField::Distance | InputField::Duration => true,
            extra => extra == self.active_extra_field(),
        }
    }

    pub fn set_value(&mut self, field: InputField, raw: impl Into<String>) {
        *self.values.get_mut(field) = raw.into();
    }

    pub fn value(&self, field: InputField) -> &str {
        self.values.get(field)
    }

    /// Copy a submission into the form fields.
    pub fn enter(&mut self, input: &FormInput) {
        self.select_type(input.activity_type);
        self.set_value(InputField::Distance, input.distance.as_str());
        self.set_value(InputField::Duration, input.duration.as_str());
        self.set_value(self.active_extra_field(), input.extra.as_str());
    }

    /// Read and check the entered values for `activity_type`.
    pub fn validate_and_extract(
        &self,
        activity_type: ActivityType,
    ) -> Result<ValidatedInput, ValidationError> {
        let distance = self.positive(InputField::Distance)?;
        let duration = self.positive(InputField::Duration)?;

        let detail = match activity_type {
            ActivityType::Running => ActivityDetail::Running {
                cadence: self.positive_whole(InputField::Cadence)?,
            },
            ActivityType::Cycling => {
                let elevation_gain = self.number(InputField::ElevationGain)?;
                if elevation_gain < 0.0 {
                    return Err(ValidationError::Negative(InputField::ElevationGain));
                }
                ActivityDetail::Cycling { elevation_gain }
            }
            ActivityType::Swimming => ActivityDetail::Swimming {
                laps: self.positive_whole(InputField::Laps)?,
            },
        };

        Ok(ValidatedInput {
            distance,
            duration,
            detail,
        })
    }

    fn number(&self, field: InputField) -> Result<f64, ValidationError> {
        parse_number(field, self.values.get(field))
    }

    fn positive(&self, field: InputField) -> Result<f64, ValidationError> {
        let value = self.number(field)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ValidationError::NotPositive(field))
        }
    }

    fn positive_whole(&self, field: InputField) -> Result<u32, ValidationError> {
        let value = self.positive(field)?;
        if value.fract() != 0.0 {
            return Err(ValidationError::NotWhole(field));
        }
        if value > f64::from(u32::MAX) {
            return Err(ValidationError::TooLarge(field));
        }
        Ok(value as u32)
    }
}

fn parse_number(field: InputField, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber(field)),
    }
}

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The {0} is missing")]
    Missing(InputField),

    #[error("The {0} has to be a number")]
    NotANumber(InputField),

    #[error("The {0} has to be a positive number")]
    NotPositive(InputField),

    #[error("The {0} cannot be negative")]
    Negative(InputField),

    #[error("The {0} has to be a whole number")]
    NotWhole(InputField),

    #[error("The {0} is too large")]
    TooLarge(InputField),

    #[error("Click on the map to choose where the workout happened")]
    NoLocation,
}

impl ValidationError {
    /// The offending field, if the error is about one.
    pub fn field(&self) -> Option<InputField> {
        match *self {
            ValidationError::Missing(f)
            | ValidationError::NotANumber(f)
            | ValidationError::NotPositive(f)
            | ValidationError::Negative(f)
            | ValidationError::NotWhole(f)
            | ValidationError::TooLarge(f) => Some(f),
            ValidationError::NoLocation => None,
        }
    }
}
