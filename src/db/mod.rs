// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value persistence backends.
//!
//! The store is an opaque string slot map, mirroring what a browser's local
//! storage offers: get, set and remove by key.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Opaque string key-value store.
pub trait KeyValueStore {
    /// Read a slot. `Ok(None)` when the slot does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a slot, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}

impl StorageError {
    pub fn read(key: &str, reason: impl ToString) -> Self {
        StorageError::Read {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: &str, reason: impl ToString) -> Self {
        StorageError::Write {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
