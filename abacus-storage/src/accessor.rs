// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The narrow interface through which contract operations read and write state.

use abacus_base::{
    encoding::{ByteOrder, EncodingError},
    identifiers::StateKey,
};
use thiserror::Error;

use crate::store::{KeyValueStoreError, ReadableKeyValueStore, WritableKeyValueStore};

/// A failure of the state accessor. It is fatal to the current invocation and is never
/// retried by the contract.
#[derive(Debug, Error)]
pub enum StateError {
    /// The host store could not complete a read or a write.
    #[error("Storage unavailable ({backend} backend): {error}")]
    StorageUnavailable {
        /// The name of the failing backend.
        backend: &'static str,
        /// The error reported by the backend.
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The bytes stored at a key are not an encoded value.
    #[error("Invalid value stored at key {key}: {error}")]
    InvalidValue {
        /// The key holding the invalid bytes.
        key: StateKey,
        /// The decoding failure.
        error: EncodingError,
    },
}

impl StateError {
    /// Wraps a store failure.
    pub fn storage<E: KeyValueStoreError>(error: E) -> Self {
        StateError::StorageUnavailable {
            backend: E::BACKEND,
            error: Box::new(error),
        }
    }
}

/// Reads and writes named 64-bit values in the host-owned store.
///
/// The accessor offers a strictly sequential, last-write-wins view: there is no
/// compare-and-swap and no versioning. This is only sound because of a precondition on
/// the host: invocations against the same state run one at a time, to completion,
/// without interleaving.
pub trait StateAccessor {
    /// Returns the value at `key`, or zero if `key` was never written.
    fn read(&mut self, key: StateKey) -> Result<u64, StateError>;

    /// Replaces the value at `key`.
    fn write(&mut self, key: StateKey, value: u64) -> Result<(), StateError>;
}

/// A [`StateAccessor`] backed by a key-value store, encoding values with the host's
/// [`ByteOrder`].
#[derive(Clone, Debug)]
pub struct StoreAccessor<S> {
    store: S,
    byte_order: ByteOrder,
}

impl<S> StoreAccessor<S> {
    /// Creates an accessor over `store`.
    pub fn new(store: S, byte_order: ByteOrder) -> Self {
        StoreAccessor { store, byte_order }
    }

    /// Returns the byte order used to encode values.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the accessor, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> StateAccessor for StoreAccessor<S>
where
    S: ReadableKeyValueStore + WritableKeyValueStore,
{
    fn read(&mut self, key: StateKey) -> Result<u64, StateError> {
        let bytes = self
            .store
            .read_value_bytes(key.as_bytes())
            .map_err(StateError::storage)?;
        match bytes {
            None => Ok(0),
            Some(bytes) => self
                .byte_order
                .decode_u64(&bytes)
                .map_err(|error| StateError::InvalidValue { key, error }),
        }
    }

    fn write(&mut self, key: StateKey, value: u64) -> Result<(), StateError> {
        tracing::trace!(%key, value, "Writing state value");
        self.store
            .write_value_bytes(key.as_bytes(), &self.byte_order.encode_u64(value))
            .map_err(StateError::storage)
    }
}

impl<A: StateAccessor + ?Sized> StateAccessor for &mut A {
    fn read(&mut self, key: StateKey) -> Result<u64, StateError> {
        (**self).read(key)
    }

    fn write(&mut self, key: StateKey, value: u64) -> Result<(), StateError> {
        (**self).write(key, value)
    }
}
