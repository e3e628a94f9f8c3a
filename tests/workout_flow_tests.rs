// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests for creating, selecting, deleting and resetting
//! workouts through the app controller.

mod common;

use common::{FailingStore, FormEvent, Harness};
use mapty::db::{KeyValueStore, MemoryStore};
use mapty::error::AppError;
use mapty::models::{ActivityType, Coordinates, InputField, StoredWorkout};
use mapty::services::{FormInput, FormPresentation, ValidationError, PAN_DURATION};
use mapty::AppEvent;

fn london() -> Coordinates {
    Coordinates::new(51.5, -0.1)
}

fn stored(store: &MemoryStore) -> Vec<StoredWorkout> {
    let raw = store.get("workouts").unwrap().expect("slot written");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_running_workout_is_created_and_persisted() {
    let store = MemoryStore::new();
    let mut h = Harness::with_backend(Box::new(store.clone()));
    h.locate(london());

    assert!(h.click(london()));
    assert!(h.app.form().is_visible());

    let id = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Running, "5", "25", "180"))
        .unwrap();

    let workouts = h.app.workouts();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].id(), &id);
    assert_eq!(workouts[0].activity_type(), ActivityType::Running);
    assert_eq!(workouts[0].pace(), Some(5.0));
    assert_eq!(workouts[0].coordinates(), london());
    assert_eq!(workouts[0].description(), "Running on April 14");

    let markers = h.map.borrow().live_markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].0, london());
    assert_eq!(markers[0].1.class_name, "running-popup");

    let list = h.list.borrow();
    assert_eq!(list.entries.len(), 1);
    assert_eq!(list.entries[0].class_name(), "workout--running");
    assert_eq!(list.entries[0].details[2].value, "5.0");

    assert!(!h.app.form().is_visible());
    assert!(h.app.map().pending_click().is_none());

    let persisted = stored(&store);
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, id);
    assert!(h.alerts().is_empty());
}

#[test]
fn test_cycling_speed() {
    let mut h = Harness::new();
    h.locate(london());
    h.click(Coordinates::new(51.51, -0.12));

    h.app.on_type_selected(ActivityType::Cycling);
    assert_eq!(h.app.form().active_extra_field(), InputField::ElevationGain);

    h.app
        .on_form_submitted(FormInput::new(ActivityType::Cycling, "20", "60", "300"))
        .unwrap();

    assert_eq!(h.app.workouts()[0].speed(), Some(20.0));
    assert_eq!(h.app.workouts()[0].pace(), None);
}

#[test]
fn test_invalid_input_leaves_list_unchanged() {
    let store = MemoryStore::new();
    let mut h = Harness::with_backend(Box::new(store.clone()));
    h.locate(london());
    h.click(london());

    let err = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Running, "-5", "25", "180"))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::NotPositive(InputField::Distance))
    ));

    let err = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Running, "5", "NaN", "180"))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::NotANumber(InputField::Duration))
    ));

    assert!(h.app.workouts().is_empty());
    assert!(h.list.borrow().entries.is_empty());
    assert!(h.map.borrow().live_markers().is_empty());
    assert!(store.is_empty());

    // Form stays open with what was typed
    assert!(h.app.form().is_visible());
    assert_eq!(h.app.form().value(InputField::Duration), "NaN");
    assert_eq!(h.app.form().location(), Some(london()));

    assert_eq!(
        h.alerts(),
        vec![
            "The distance has to be a positive number".to_string(),
            "The duration has to be a number".to_string(),
        ]
    );
}

#[test]
fn test_submit_without_click_is_rejected() {
    let mut h = Harness::new();
    h.locate(london());

    let err = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Running, "5", "25", "180"))
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(ValidationError::NoLocation)
    ));
    assert!(h.app.workouts().is_empty());
}

#[test]
fn test_field_errors_come_before_missing_location() {
    let mut h = Harness::new();
    h.locate(london());

    let err = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Running, "-5", "25", "180"))
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(ValidationError::NotPositive(InputField::Distance))
    ));
    assert_eq!(h.alerts().len(), 1);
    assert!(h.app.workouts().is_empty());
}

#[test]
fn test_ids_are_unique() {
    let mut h = Harness::new();
    h.locate(london());

    for distance in ["5", "6", "7"] {
        h.click(london());
        h.app
            .on_form_submitted(FormInput::new(ActivityType::Running, distance, "25", "180"))
            .unwrap();
    }

    let mut ids: Vec<_> = h.app.workouts().iter().map(|w| w.id().clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_selection_pans_and_counts() {
    let store = MemoryStore::new();
    let mut h = Harness::with_backend(Box::new(store.clone()));
    h.locate(london());

    let at = Coordinates::new(48.85, 2.35);
    h.click(at);
    let id = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Swimming, "1000", "20", "20"))
        .unwrap();

    assert!(h.app.on_workout_selected(&id));
    assert!(h.app.on_workout_selected(&id));

    assert_eq!(h.app.workout(&id).unwrap().interaction_count(), 2);
    assert_eq!(
        h.map.borrow().views.last(),
        Some(&(at, 13, Some(PAN_DURATION)))
    );
    assert_eq!(stored(&store)[0].interaction_count, 2);
}

#[test]
fn test_selecting_unknown_id_is_noop() {
    let mut h = Harness::new();
    h.locate(london());
    let views = h.map.borrow().views.len();

    assert!(!h.app.on_workout_selected(&"0000000001".into()));
    assert_eq!(h.map.borrow().views.len(), views);
}

#[test]
fn test_delete_removes_marker_entry_and_stored_record() {
    let store = MemoryStore::new();
    let mut h = Harness::with_backend(Box::new(store.clone()));
    h.locate(london());

    h.click(london());
    let first = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Running, "5", "25", "180"))
        .unwrap();
    h.click(Coordinates::new(51.6, -0.2));
    let second = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Cycling, "20", "60", "0"))
        .unwrap();

    assert!(h.app.on_workout_deleted(&first));
    assert!(!h.app.on_workout_deleted(&first));

    assert_eq!(h.app.workouts().len(), 1);
    assert!(!h.app.map().has_marker(&first));
    assert!(h.app.map().has_marker(&second));
    assert_eq!(h.map.borrow().live_markers().len(), 1);

    let list = h.list.borrow();
    assert_eq!(list.entries.len(), 1);
    assert_eq!(list.entries[0].id, second);

    let persisted = stored(&store);
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, second);
}

#[test]
fn test_form_reopened_right_after_submit_waits_for_cool_down() {
    let mut h = Harness::new();
    h.locate(london());
    let there = Coordinates::new(51.51, -0.12);

    h.click(london());
    h.app.on_type_selected(ActivityType::Swimming);
    h.app
        .on_form_submitted(FormInput::new(ActivityType::Swimming, "1000", "20", "20"))
        .unwrap();
    h.click(there);
    h.app.reset();

    assert_eq!(
        *h.form.borrow(),
        vec![
            FormEvent::Opened(london(), FormPresentation::Shown),
            FormEvent::TypeSelected(ActivityType::Swimming, InputField::Laps),
            FormEvent::Closed,
            FormEvent::Opened(there, FormPresentation::CoolingDown),
            FormEvent::Closed,
        ]
    );
}

#[test]
fn test_reset_clears_everything() {
    let store = MemoryStore::new();
    let mut h = Harness::with_backend(Box::new(store.clone()));
    h.locate(london());

    h.click(london());
    h.app
        .on_form_submitted(FormInput::new(ActivityType::Running, "5", "25", "180"))
        .unwrap();
    h.click(london());

    h.app.reset();

    assert!(h.app.workouts().is_empty());
    assert!(store.is_empty());
    assert!(h.map.borrow().live_markers().is_empty());
    assert_eq!(h.app.map().marker_count(), 0);
    assert!(h.list.borrow().entries.is_empty());
    assert_eq!(h.list.borrow().clears, 1);
    assert!(!h.app.form().is_visible());
}

#[test]
fn test_events_are_dispatched_in_order() {
    let mut h = Harness::new();
    h.locate(london());
    let events = h.app.sender();

    h.click(london());
    events
        .send(AppEvent::TypeSelected(ActivityType::Swimming))
        .unwrap();
    events
        .send(AppEvent::FormSubmitted(FormInput::new(
            ActivityType::Swimming,
            "1000",
            "20",
            "20",
        )))
        .unwrap();
    events.send(AppEvent::Quit).unwrap();
    events.send(AppEvent::Reset).unwrap();

    // Stops at Quit; Reset stays queued
    assert_eq!(h.app.process_pending(), 3);
    assert_eq!(h.app.workouts().len(), 1);
    assert_eq!(h.app.workouts()[0].pace(), Some(60.0));

    assert_eq!(h.app.process_pending(), 1);
    assert!(h.app.workouts().is_empty());
}

#[test]
fn test_storage_failures_are_not_fatal() {
    let mut h = Harness::with_backend(Box::new(FailingStore));
    assert!(h.app.workouts().is_empty());
    h.locate(london());

    h.click(london());
    let id = h
        .app
        .on_form_submitted(FormInput::new(ActivityType::Running, "5", "25", "180"))
        .unwrap();
    assert!(h.app.on_workout_selected(&id));
    h.app.reset();

    assert!(h.app.workouts().is_empty());
    assert!(h.alerts().is_empty());
}
