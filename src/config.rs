// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use crate::models::Coordinates;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Zoom level used when the map is first shown and when panning to a workout.
pub const DEFAULT_ZOOM_LEVEL: u8 = 13;

/// Delay before a hidden form can be presented again.
pub const DEFAULT_FORM_COOLDOWN: Duration = Duration::from_millis(1000);

/// Storage slot holding the serialized workout list.
pub const DEFAULT_STORAGE_KEY: &str = "workouts";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory used by the file-backed store
    pub data_dir: PathBuf,
    /// Key of the persisted workout slot
    pub storage_key: String,
    /// Map zoom level for the initial view and pans
    pub zoom_level: u8,
    /// Cool-down after hiding the workout form
    pub form_cooldown: Duration,
    /// Fixed position reported by the console geolocator
    pub home_position: Option<Coordinates>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            zoom_level: DEFAULT_ZOOM_LEVEL,
            form_cooldown: DEFAULT_FORM_COOLDOWN,
            home_position: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let zoom_level = match env::var("MAPTY_ZOOM_LEVEL") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::Invalid("MAPTY_ZOOM_LEVEL"))?,
            Err(_) => defaults.zoom_level,
        };

        let form_cooldown = match env::var("MAPTY_FORM_COOLDOWN_MS") {
            Ok(raw) => Duration::from_millis(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("MAPTY_FORM_COOLDOWN_MS"))?,
            ),
            Err(_) => defaults.form_cooldown,
        };

        Ok(Self {
            data_dir: env::var("MAPTY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_key: env::var("MAPTY_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.storage_key),
            zoom_level,
            form_cooldown,
            home_position: home_position_from_env()?,
        })
    }
}

/// Both coordinates must be present, or neither.
fn home_position_from_env() -> Result<Option<Coordinates>, ConfigError> {
    let lat = env::var("MAPTY_HOME_LAT").ok();
    let lng = env::var("MAPTY_HOME_LNG").ok();

    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat = lat
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::Invalid("MAPTY_HOME_LAT"))?;
            let lng = lng
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::Invalid("MAPTY_HOME_LNG"))?;
            Coordinates::checked(lat, lng)
                .map(Some)
                .ok_or(ConfigError::Invalid("MAPTY_HOME_LAT/MAPTY_HOME_LNG"))
        }
        (None, Some(_)) => Err(ConfigError::Missing("MAPTY_HOME_LAT")),
        (Some(_), None) => Err(ConfigError::Missing("MAPTY_HOME_LNG")),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
