// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the components the app controller orchestrates.

pub mod form;
pub mod geolocation;
pub mod map;
pub mod workout_store;

pub use form::{
    FormController, FormInput, FormPresentation, FormState, ValidatedInput, ValidationError,
};
pub use geolocation::{
    position_request, FixedPosition, GeolocationError, Geolocator, PositionRequest,
    PositionResolver,
};
pub use map::{
    ClickHandler, MapController, MapError, MapFactory, MapWidget, MarkerHandle, MarkerPopup,
    PAN_DURATION,
};
pub use workout_store::WorkoutStore;
