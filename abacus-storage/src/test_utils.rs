// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Stores and accessors to help with testing contracts without a live host.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use abacus_base::encoding::ByteOrder;
use thiserror::Error;

use crate::{
    accessor::StoreAccessor,
    memory::MemoryStore,
    store::{KeyValueStoreError, ReadableKeyValueStore, WithError, WritableKeyValueStore},
};

/// A [`StoreAccessor`] over a fresh [`MemoryStore`].
pub type MemoryAccessor = StoreAccessor<MemoryStore>;

/// Creates a [`MemoryAccessor`] with the default byte order.
pub fn memory_accessor() -> MemoryAccessor {
    StoreAccessor::new(MemoryStore::default(), ByteOrder::default())
}

/// The error returned by a [`FailingStore`] once a failure was injected.
#[derive(Debug, Error)]
#[error("Injected {0} failure")]
pub struct InjectedFailure(&'static str);

impl KeyValueStoreError for InjectedFailure {
    const BACKEND: &'static str = "failing";
}

/// A [`MemoryStore`] wrapper where reads and writes can be made to fail on demand.
///
/// Clones share the failure switches.
#[derive(Clone, Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FailingStore {
    /// Creates a store over `inner` that does not fail yet.
    pub fn new(inner: MemoryStore) -> Self {
        FailingStore {
            inner,
            ..FailingStore::default()
        }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Makes every following read fail, or succeed again.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Release);
    }

    /// Makes every following write fail, or succeed again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Release);
    }
}

impl WithError for FailingStore {
    type Error = InjectedFailure;
}

impl ReadableKeyValueStore for FailingStore {
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, InjectedFailure> {
        if self.fail_reads.load(Ordering::Acquire) {
            return Err(InjectedFailure("read"));
        }
        Ok(self
            .inner
            .read_value_bytes(key)
            .unwrap_or_else(|never| match never {}))
    }
}

impl WritableKeyValueStore for FailingStore {
    fn write_value_bytes(&self, key: &[u8], value: &[u8]) -> Result<(), InjectedFailure> {
        if self.fail_writes.load(Ordering::Acquire) {
            return Err(InjectedFailure("write"));
        }
        self.inner
            .write_value_bytes(key, value)
            .unwrap_or_else(|never| match never {});
        Ok(())
    }
}
