// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This provides the trait definitions for the host stores.
//!
//! The traits are synchronous: an invocation runs to completion against the store and
//! never suspends.

use std::fmt::Debug;

use crate::batch::{Batch, WriteOperation};

/// The error type for the key-value stores.
pub trait KeyValueStoreError: std::error::Error + Debug + Send + Sync + 'static {
    /// The name of the backend.
    const BACKEND: &'static str;
}

/// Define an associated [`KeyValueStoreError`].
pub trait WithError {
    /// The error type.
    type Error: KeyValueStoreError;
}

/// Read key-value operations (the host's `get`).
pub trait ReadableKeyValueStore: WithError {
    /// Retrieves a `Vec<u8>` from the store using the provided `key`, or `None` if the key
    /// was never written.
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error>;
}

/// Write key-value operations (the host's `set`).
pub trait WritableKeyValueStore: WithError {
    /// Replaces the value at `key`.
    fn write_value_bytes(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error>;

    /// Writes the `batch` in the store, in order.
    fn write_batch(&self, batch: Batch) -> Result<(), Self::Error> {
        for operation in batch.operations {
            match operation {
                WriteOperation::Put { key, value } => self.write_value_bytes(&key, &value)?,
            }
        }
        Ok(())
    }
}

impl<S: WithError + ?Sized> WithError for &S {
    type Error = S::Error;
}

impl<S: ReadableKeyValueStore + ?Sized> ReadableKeyValueStore for &S {
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error> {
        (**self).read_value_bytes(key)
    }
}

impl<S: WritableKeyValueStore + ?Sized> WritableKeyValueStore for &S {
    fn write_value_bytes(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        (**self).write_value_bytes(key, value)
    }

    fn write_batch(&self, batch: Batch) -> Result<(), Self::Error> {
        (**self).write_batch(batch)
    }
}
