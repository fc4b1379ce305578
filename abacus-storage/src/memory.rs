// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Implements the store traits in memory.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, RwLock},
};

use crate::{
    batch::{Batch, WriteOperation},
    store::{KeyValueStoreError, ReadableKeyValueStore, WithError, WritableKeyValueStore},
};

/// The values in a memory store.
type MemoryStoreMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// A store where data is kept in memory.
///
/// Clones share the same underlying map, so a host and a test can hold handles to the
/// same state.
///
/// The map lock is never held while contract code runs, so it is only poisoned by a
/// panic inside the store itself.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    map: Arc<RwLock<MemoryStoreMap>>,
}

/// The error type for [`MemoryStore`].
///
/// The memory store itself never fails; this type only exists to satisfy
/// [`WithError`].
#[derive(Debug)]
pub enum MemoryStoreError {}

impl fmt::Display for MemoryStoreError {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for MemoryStoreError {}

impl KeyValueStoreError for MemoryStoreError {
    const BACKEND: &'static str = "memory";
}

impl MemoryStore {
    /// Creates a store holding the given entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (Vec<u8>, Vec<u8>)>) -> Self {
        MemoryStore {
            map: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    /// Returns a copy of every key-value pair, ordered by key.
    pub fn snapshot(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        let map = self
            .map
            .read()
            .expect("MemoryStore lock should not be poisoned");
        map.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl WithError for MemoryStore {
    type Error = MemoryStoreError;
}

impl ReadableKeyValueStore for MemoryStore {
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, MemoryStoreError> {
        let map = self
            .map
            .read()
            .expect("MemoryStore lock should not be poisoned");
        Ok(map.get(key).cloned())
    }
}

impl WritableKeyValueStore for MemoryStore {
    fn write_value_bytes(&self, key: &[u8], value: &[u8]) -> Result<(), MemoryStoreError> {
        let mut map = self
            .map
            .write()
            .expect("MemoryStore lock should not be poisoned");
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    /// Applies the whole batch under a single lock, so that readers never observe it
    /// half-written.
    fn write_batch(&self, batch: Batch) -> Result<(), MemoryStoreError> {
        let mut map = self
            .map
            .write()
            .expect("MemoryStore lock should not be poisoned");
        for operation in batch.operations {
            match operation {
                WriteOperation::Put { key, value } => {
                    map.insert(key, value);
                }
            }
        }
        Ok(())
    }
}
