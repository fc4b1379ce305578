// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A write buffer layered over a readable store.

use std::{collections::BTreeMap, sync::RwLock};

use crate::{
    batch::Batch,
    store::{ReadableKeyValueStore, WithError, WritableKeyValueStore},
};

/// Buffers the writes of one invocation on top of a base store.
///
/// Reads observe the buffered writes first, then the base store. Nothing reaches the base
/// store until the host turns the buffer into a [`Batch`] with
/// [`OverlayStore::into_batch`] and commits it.
pub struct OverlayStore<S> {
    base: S,
    pending: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl<S> OverlayStore<S> {
    /// Creates an empty overlay over `base`.
    pub fn new(base: S) -> Self {
        OverlayStore {
            base,
            pending: RwLock::default(),
        }
    }

    /// Returns the number of distinct keys written through the overlay.
    pub fn pending_writes(&self) -> usize {
        self.pending
            .read()
            .expect("OverlayStore lock should not be poisoned")
            .len()
    }

    /// Consumes the overlay, returning the buffered writes in key order.
    pub fn into_batch(self) -> Batch {
        let pending = self
            .pending
            .into_inner()
            .expect("OverlayStore lock should not be poisoned");
        let mut batch = Batch::new();
        for (key, value) in pending {
            batch.put_key_value_bytes(key, value);
        }
        batch
    }
}

impl<S: WithError> WithError for OverlayStore<S> {
    type Error = S::Error;
}

impl<S: ReadableKeyValueStore> ReadableKeyValueStore for OverlayStore<S> {
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error> {
        let pending = self
            .pending
            .read()
            .expect("OverlayStore lock should not be poisoned");
        if let Some(value) = pending.get(key) {
            return Ok(Some(value.clone()));
        }
        drop(pending);
        self.base.read_value_bytes(key)
    }
}

impl<S: WithError> WritableKeyValueStore for OverlayStore<S> {
    fn write_value_bytes(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        self.pending
            .write()
            .expect("OverlayStore lock should not be poisoned")
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
