// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use abacus_base::{encoding::ByteOrder, identifiers::StateKey};
use assert_matches::assert_matches;

use crate::{
    test_utils::{memory_accessor, FailingStore},
    Batch, MemoryStore, OverlayStore, PrefixedStore, ReadableKeyValueStore, StateAccessor,
    StateError, StoreAccessor, WritableKeyValueStore,
};

const KEY: StateKey = StateKey::new(b"slot");

#[test_log::test]
fn test_absent_key_reads_as_zero() {
    let mut accessor = memory_accessor();
    assert_eq!(accessor.read(KEY).unwrap(), 0);
    assert!(accessor.store().snapshot().is_empty());
}

#[test_log::test]
fn test_write_then_read() {
    let mut accessor = memory_accessor();
    accessor.write(KEY, 17).unwrap();
    assert_eq!(accessor.read(KEY).unwrap(), 17);
    accessor.write(KEY, 3).unwrap();
    assert_eq!(accessor.read(KEY).unwrap(), 3);
}

#[test_log::test]
fn test_values_use_the_configured_byte_order() {
    let store = MemoryStore::default();
    let mut accessor = StoreAccessor::new(store.clone(), ByteOrder::Big);
    accessor.write(KEY, 258).unwrap();
    assert_eq!(
        store.read_value_bytes(b"slot").unwrap(),
        Some(vec![0, 0, 0, 0, 0, 0, 1, 2])
    );
}

#[test_log::test]
fn test_invalid_stored_bytes_are_reported() {
    let store = MemoryStore::from_entries([(b"slot".to_vec(), vec![1, 2, 3])]);
    let mut accessor = StoreAccessor::new(store, ByteOrder::Little);
    assert_matches!(
        accessor.read(KEY),
        Err(StateError::InvalidValue { key, .. }) if key == KEY
    );
}

#[test_log::test]
fn test_store_failures_are_storage_unavailable() {
    let store = FailingStore::default();
    let mut accessor = StoreAccessor::new(store.clone(), ByteOrder::Little);

    store.fail_reads(true);
    assert_matches!(
        accessor.read(KEY),
        Err(StateError::StorageUnavailable { backend: "failing", .. })
    );

    store.fail_reads(false);
    store.fail_writes(true);
    assert_matches!(
        accessor.write(KEY, 1),
        Err(StateError::StorageUnavailable { backend: "failing", .. })
    );
    assert!(store.inner().snapshot().is_empty());
}

#[test_log::test]
fn test_memory_store_clones_share_data() {
    let store = MemoryStore::default();
    let clone = store.clone();
    store.write_value_bytes(b"a", b"1").unwrap();
    assert_eq!(clone.read_value_bytes(b"a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(clone.snapshot(), vec![(b"a".to_vec(), b"1".to_vec())]);
}

#[test_log::test]
fn test_batch_is_last_write_wins() {
    let store = MemoryStore::default();
    let mut batch = Batch::new();
    batch.put_key_value_bytes(b"a".to_vec(), b"1".to_vec());
    batch.put_key_value_bytes(b"a".to_vec(), b"2".to_vec());
    assert_eq!(batch.len(), 2);
    store.write_batch(batch).unwrap();
    assert_eq!(store.read_value_bytes(b"a").unwrap(), Some(b"2".to_vec()));
}

#[test_log::test]
fn test_overlay_buffers_writes() {
    let store = MemoryStore::from_entries([(b"a".to_vec(), b"base".to_vec())]);
    let overlay = OverlayStore::new(&store);

    assert_eq!(overlay.read_value_bytes(b"a").unwrap(), Some(b"base".to_vec()));
    overlay.write_value_bytes(b"a", b"new").unwrap();
    overlay.write_value_bytes(b"b", b"other").unwrap();
    overlay.write_value_bytes(b"a", b"newer").unwrap();

    assert_eq!(overlay.read_value_bytes(b"a").unwrap(), Some(b"newer".to_vec()));
    assert_eq!(store.read_value_bytes(b"a").unwrap(), Some(b"base".to_vec()));
    assert_eq!(store.read_value_bytes(b"b").unwrap(), None);
    assert_eq!(overlay.pending_writes(), 2);

    let batch = overlay.into_batch();
    assert_eq!(batch.len(), 2);
    store.write_batch(batch).unwrap();
    assert_eq!(store.read_value_bytes(b"a").unwrap(), Some(b"newer".to_vec()));
    assert_eq!(store.read_value_bytes(b"b").unwrap(), Some(b"other".to_vec()));
}

#[test_log::test]
fn test_dropped_overlay_leaves_base_untouched() {
    let store = MemoryStore::default();
    {
        let mut accessor = StoreAccessor::new(OverlayStore::new(&store), ByteOrder::Little);
        accessor.write(KEY, 5).unwrap();
        assert_eq!(accessor.read(KEY).unwrap(), 5);
    }
    assert!(store.snapshot().is_empty());
}

#[test_log::test]
fn test_prefixed_stores_are_isolated() {
    let store = MemoryStore::default();
    let first = PrefixedStore::new(&store, b"first/".to_vec());
    let second = PrefixedStore::new(&store, b"second/".to_vec());

    first.write_value_bytes(b"k", b"1").unwrap();
    let mut batch = Batch::new();
    batch.put_key_value_bytes(b"k".to_vec(), b"2".to_vec());
    second.write_batch(batch).unwrap();

    assert_eq!(first.read_value_bytes(b"k").unwrap(), Some(b"1".to_vec()));
    assert_eq!(second.read_value_bytes(b"k").unwrap(), Some(b"2".to_vec()));
    assert_eq!(
        store.snapshot(),
        vec![
            (b"first/k".to_vec(), b"1".to_vec()),
            (b"second/k".to_vec(), b"2".to_vec()),
        ]
    );
}
