// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Snapshots of a [`MemoryStore`] kept in a JSON file between runs.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use abacus_storage::MemoryStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("I/O error on state file {path}: {error}")]
    Io { path: PathBuf, error: io::Error },

    #[error("State file {path} is not valid JSON: {error}")]
    Json {
        path: PathBuf,
        error: serde_json::Error,
    },

    #[error("State file {path} holds an invalid hexadecimal entry: {error}")]
    Hex {
        path: PathBuf,
        error: hex::FromHexError,
    },
}

/// A JSON object mapping hexadecimal keys to hexadecimal values.
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StateFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot into a new store. A missing file yields an empty store.
    pub fn load(&self) -> Result<MemoryStore, StateFileError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No state file yet, starting empty");
                return Ok(MemoryStore::default());
            }
            Err(error) => return Err(self.io_error(error)),
        };
        let entries: BTreeMap<String, String> =
            serde_json::from_slice(&contents).map_err(|error| StateFileError::Json {
                path: self.path.clone(),
                error,
            })?;
        let entries = entries
            .into_iter()
            .map(|(key, value)| -> Result<_, hex::FromHexError> {
                Ok((hex::decode(key)?, hex::decode(value)?))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| StateFileError::Hex {
                path: self.path.clone(),
                error,
            })?;
        Ok(MemoryStore::from_entries(entries))
    }

    /// Writes a snapshot of `store`, replacing the file atomically.
    pub fn save(&self, store: &MemoryStore) -> Result<(), StateFileError> {
        let entries = store
            .snapshot()
            .into_iter()
            .map(|(key, value)| (hex::encode(key), hex::encode(value)))
            .collect::<BTreeMap<_, _>>();
        let contents = serde_json::to_vec_pretty(&entries).map_err(|error| {
            StateFileError::Json {
                path: self.path.clone(),
                error,
            }
        })?;

        let temporary_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temporary_path).map_err(|error| self.io_error(error))?;
        file.write_all(&contents)
            .and_then(|()| file.sync_all())
            .map_err(|error| self.io_error(error))?;
        fs::rename(&temporary_path, &self.path).map_err(|error| self.io_error(error))
    }

    fn io_error(&self, error: io::Error) -> StateFileError {
        StateFileError::Io {
            path: self.path.clone(),
            error,
        }
    }
}
