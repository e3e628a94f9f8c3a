// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted workout collection.
//!
//! The whole ordered list lives in one slot as a JSON array. Reads never
//! fail observably: a missing or unreadable slot yields an empty list, and
//! individual entries that cannot be rehydrated, or that repeat an id already
//! loaded, are skipped. Skipped entries are kept verbatim and written back
//! after the workouts on every save, so nothing stored is lost until the slot
//! is cleared. Writes are best effort; failures are logged and otherwise
//! ignored.

use crate::db::KeyValueStore;
use crate::models::{StoredWorkout, StoredWorkoutError, Workout, WorkoutId};
use serde_json::Value;
use std::collections::HashSet;

pub struct WorkoutStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    /// Raw entries skipped by the last load
    retained: Vec<Value>,
}

impl WorkoutStore {
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            retained: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Entries the last load could not use, in stored order.
    pub fn retained(&self) -> &[Value] {
        &self.retained
    }

    /// Overwrite the slot with `workouts`, in order, followed by the
    /// retained entries.
    pub fn save(&self, workouts: &[Workout]) {
        let mut entries = Vec::with_capacity(workouts.len() + self.retained.len());
        for workout in workouts {
            match serde_json::to_value(StoredWorkout::from(workout)) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(id = %workout.id(), error = %e, "Failed to serialize workout");
                    return;
                }
            }
        }
        entries.extend(self.retained.iter().cloned());

        let json = match serde_json::to_string(&entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize workouts");
                return;
            }
        };

        match self.backend.set(&self.key, &json) {
            Ok(()) => tracing::debug!(
                key = %self.key,
                count = workouts.len(),
                retained = self.retained.len(),
                "Workouts saved"
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to save workouts"),
        }
    }

    /// Read the slot and rebuild each entry as its proper variant.
    ///
    /// Of entries sharing an id only the first is loaded.
    pub fn load(&mut self) -> Vec<Workout> {
        self.retained.clear();

        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored workouts");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored workouts");
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored workouts are unreadable");
                return Vec::new();
            }
        };

        let mut seen: HashSet<WorkoutId> = HashSet::new();
        let mut workouts = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let workout = match rehydrate(entry.clone()) {
                Ok(workout) => workout,
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping stored workout");
                    self.retained.push(entry);
                    continue;
                }
            };
            if !seen.insert(workout.id().clone()) {
                tracing::warn!(
                    index,
                    id = %workout.id(),
                    "Skipping stored workout with duplicate id"
                );
                self.retained.push(entry);
                continue;
            }
            workouts.push(workout);
        }

        tracing::info!(
            loaded = workouts.len(),
            skipped = self.retained.len(),
            "Workouts loaded"
        );
        workouts
    }

    /// Remove the slot entirely, retained entries included.
    pub fn clear(&mut self) {
        self.retained.clear();
        match self.backend.remove(&self.key) {
            Ok(()) => tracing::info!(key = %self.key, "Stored workouts cleared"),
            Err(e) => tracing::warn!(error = %e, "Failed to clear stored workouts"),
        }
    }
}

fn rehydrate(entry: Value) -> Result<Workout, StoredWorkoutError> {
    let stored: StoredWorkout = serde_json::from_value(entry)?;
    Workout::try_from(stored)
}
