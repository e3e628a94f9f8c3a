// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty: log running, cycling and swimming workouts on a map.
//!
//! This crate provides the workout domain model, the persisted workout
//! store, and the controllers that tie geolocation, map clicks, form input
//! and rendering together into one interactive session.

pub mod app;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
pub mod views;

pub use app::{AppController, AppEvent, Surfaces};
