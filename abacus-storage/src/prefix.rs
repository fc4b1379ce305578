// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A view of a store restricted to the keys starting with a fixed prefix.

use crate::store::{ReadableKeyValueStore, WithError, WritableKeyValueStore};

/// Maps every key `k` to `prefix ++ k` in the underlying store.
///
/// Hosts use this to give each deployed contract its own key space inside a shared store.
#[derive(Clone, Debug)]
pub struct PrefixedStore<S> {
    store: S,
    prefix: Vec<u8>,
}

impl<S> PrefixedStore<S> {
    /// Creates a view of `store` under `prefix`.
    pub fn new(store: S, prefix: Vec<u8>) -> Self {
        PrefixedStore { store, prefix }
    }

    /// Consumes the view, returning the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full_key = Vec::with_capacity(self.prefix.len() + key.len());
        full_key.extend_from_slice(&self.prefix);
        full_key.extend_from_slice(key);
        full_key
    }
}

impl<S: WithError> WithError for PrefixedStore<S> {
    type Error = S::Error;
}

impl<S: ReadableKeyValueStore> ReadableKeyValueStore for PrefixedStore<S> {
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error> {
        self.store.read_value_bytes(&self.full_key(key))
    }
}

impl<S: WritableKeyValueStore> WritableKeyValueStore for PrefixedStore<S> {
    fn write_value_bytes(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        self.store.write_value_bytes(&self.full_key(key), value)
    }
}
