// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.

use crate::services::{GeolocationError, MapError, ValidationError};

/// Errors surfaced by the app controller.
///
/// None of them end the session; each is reported to the user and the
/// controller carries on in a reduced mode where needed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error(transparent)]
    Map(#[from] MapError),
}

impl AppError {
    /// Message shown in the alert for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Geolocation(_) => "Could not get your position".to_string(),
            AppError::Map(MapError::Unavailable | MapError::NotInitialized) => {
                "The map is not available".to_string()
            }
            AppError::Map(e) => e.to_string(),
        }
    }
}

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, AppError>;
