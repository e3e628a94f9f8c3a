// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed store: one `<dir>/<key>.json` file per slot.

use crate::db::{KeyValueStore, StorageError};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const SLOT_EXTENSION: &str = "json";
const TMP_EXTENSION: &str = "json.tmp";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", sanitize_key(key), SLOT_EXTENSION))
    }
}

/// Keys become file names; anything outside `[A-Za-z0-9_-]` is replaced.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::write(key, e))?;

        let path = self.slot_path(key);
        let tmp = path.with_extension(TMP_EXTENSION);
        write_synced(&tmp, value).map_err(|e| StorageError::write(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::write(key, e))?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::write(key, e)),
        }
    }
}

fn write_synced(path: &Path, data: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()
}
