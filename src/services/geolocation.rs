// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-shot position lookup.
//!
//! A position request resolves exactly once, to a position or a failure.
//! There is no timeout and no retry.

use crate::models::Coordinates;
use std::future::Future;
use tokio::sync::oneshot;

/// Source of the user's current position.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>>;
}

/// Always answers with the same position, or fails when none is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}

/// Resolves a [`PositionRequest`] from elsewhere, e.g. a platform callback.
#[derive(Debug)]
pub struct PositionResolver(oneshot::Sender<Result<Coordinates, GeolocationError>>);

impl PositionResolver {
    pub fn succeed(self, position: Coordinates) {
        // The request side may already be gone; nobody is waiting then.
        let _ = self.0.send(Ok(position));
    }

    pub fn fail(self, error: GeolocationError) {
        let _ = self.0.send(Err(error));
    }
}

/// Position request completed through its [`PositionResolver`].
///
/// Dropping the resolver without answering counts as a failure.
#[derive(Debug)]
pub struct PositionRequest {
    rx: std::sync::Mutex<Option<oneshot::Receiver<Result<Coordinates, GeolocationError>>>>,
}

/// Create a linked resolver/request pair.
pub fn position_request() -> (PositionResolver, PositionRequest) {
    let (tx, rx) = oneshot::channel();
    (
        PositionResolver(tx),
        PositionRequest {
            rx: std::sync::Mutex::new(Some(rx)),
        },
    )
}

impl Geolocator for PositionRequest {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let rx = self
            .rx
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .ok_or(GeolocationError::AlreadyRequested)?;

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Dropped),
        }
    }
}

/// Geolocation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Position unavailable")]
    Unavailable,

    #[error("Permission to read the position was denied")]
    PermissionDenied,

    #[error("Position request abandoned")]
    Dropped,

    #[error("Position was already requested")]
    AlreadyRequested,
}
