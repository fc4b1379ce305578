// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
This module defines the storage interface consumed by Abacus contracts.

The host owns a key-value store, described by the traits of [`store`]. Contracts never
touch it directly: they go through a [`StateAccessor`], which reads and writes named
64-bit values and treats absent keys as zero. Writes made during a call are buffered in
an [`OverlayStore`] so that the host decides whether they are committed.
*/

#![deny(missing_docs)]

pub mod accessor;
pub mod batch;
pub mod memory;
pub mod overlay;
pub mod prefix;
pub mod store;

#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use crate::{
    accessor::{StateAccessor, StateError, StoreAccessor},
    batch::{Batch, WriteOperation},
    memory::{MemoryStore, MemoryStoreError},
    overlay::OverlayStore,
    prefix::PrefixedStore,
    store::{KeyValueStoreError, ReadableKeyValueStore, WithError, WritableKeyValueStore},
};

#[cfg(test)]
#[path = "unit_tests/storage_tests.rs"]
mod storage_tests;
