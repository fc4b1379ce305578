// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use abacus_base::identifiers::{StateKey, Tier};
use abacus_storage::{test_utils::memory_accessor, StateAccessor};
use assert_matches::assert_matches;
use test_case::test_case;

use super::{Operation, OperationDescriptor, OperationRegistry, OperationRegistryBuilder};
use crate::{Outcome, RegistryError, INIT_OPERATION};

const SLOT: StateKey = StateKey::new(b"slot");

fn noop() -> Operation {
    Operation::new(|_state| Ok(()))
}

fn read_slot() -> Operation {
    Operation::new(|state| Ok(state.read(SLOT)?))
}

fn sample_registry() -> OperationRegistry {
    OperationRegistry::from_descriptors([
        OperationDescriptor::lifecycle(INIT_OPERATION, noop()),
        OperationDescriptor::callable("inc", noop()),
        OperationDescriptor::callable("value", read_slot()),
    ])
    .expect("Sample registry has unique names")
}

#[test]
fn test_resolve_callable_operation() {
    let registry = sample_registry();
    assert!(registry.resolve(Tier::Callable, "inc").is_ok());
    assert!(registry.resolve(Tier::Lifecycle, INIT_OPERATION).is_ok());
}

#[test]
fn test_resolve_under_wrong_tier() {
    let registry = sample_registry();
    assert_matches!(
        registry.resolve(Tier::Lifecycle, "inc"),
        Err(RegistryError::WrongTier { name, requested: Tier::Lifecycle, registered: Tier::Callable })
            if name == "inc"
    );
    assert_matches!(
        registry.resolve(Tier::Callable, INIT_OPERATION),
        Err(RegistryError::WrongTier { requested: Tier::Callable, registered: Tier::Lifecycle, .. })
    );
}

#[test_case(Tier::Callable; "callable")]
#[test_case(Tier::Lifecycle; "lifecycle")]
fn test_resolve_missing_operation(tier: Tier) {
    let registry = sample_registry();
    assert_eq!(
        registry.resolve(tier, "missing").unwrap_err(),
        RegistryError::NotFound("missing".to_owned())
    );
}

#[test_case(Tier::Callable, Tier::Callable; "both_callable")]
#[test_case(Tier::Lifecycle, Tier::Lifecycle; "both_lifecycle")]
#[test_case(Tier::Lifecycle, Tier::Callable; "lifecycle_then_callable")]
#[test_case(Tier::Callable, Tier::Lifecycle; "callable_then_lifecycle")]
fn test_duplicate_names_are_rejected(first: Tier, second: Tier) {
    let mut builder = OperationRegistryBuilder::new();
    builder.register(first, "op", noop()).unwrap();
    assert_eq!(
        builder.register(second, "op", noop()).unwrap_err(),
        RegistryError::DuplicateName {
            name: "op".to_owned(),
            existing: first,
        }
    );
}

#[test]
fn test_duplicate_descriptors_fail_the_whole_registry() {
    let result = OperationRegistry::from_descriptors([
        OperationDescriptor::callable("value", noop()),
        OperationDescriptor::lifecycle("value", noop()),
    ]);
    assert_matches!(result, Err(RegistryError::DuplicateName { .. }));
}

#[test]
fn test_initializer_name_is_reserved_for_lifecycle() {
    let mut builder = OperationRegistryBuilder::new();
    assert_eq!(
        builder
            .register(Tier::Callable, INIT_OPERATION, noop())
            .unwrap_err(),
        RegistryError::ReservedName(INIT_OPERATION.to_owned())
    );
    assert!(builder.build().is_empty());

    let result = OperationRegistry::from_descriptors([
        OperationDescriptor::callable("inc", noop()),
        OperationDescriptor::callable(INIT_OPERATION, noop()),
    ]);
    assert_matches!(result, Err(RegistryError::ReservedName(name)) if name == INIT_OPERATION);
}

#[test]
fn test_partitions_are_disjoint_and_sorted() {
    let registry = sample_registry();
    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.names(Tier::Callable).collect::<Vec<_>>(),
        vec!["inc", "value"]
    );
    assert_eq!(
        registry.names(Tier::Lifecycle).collect::<Vec<_>>(),
        vec![INIT_OPERATION]
    );
}

#[test]
fn test_lifecycle_initializer_is_optional() {
    assert!(sample_registry().lifecycle_initializer().unwrap().is_some());

    let registry = OperationRegistry::from_descriptors([OperationDescriptor::callable(
        "value",
        read_slot(),
    )])
    .unwrap();
    assert!(registry.lifecycle_initializer().unwrap().is_none());

    let empty = OperationRegistryBuilder::new().build();
    assert!(empty.is_empty());
}

#[test]
fn test_resolved_operations_receive_the_accessor() {
    let registry = sample_registry();
    let mut accessor = memory_accessor();
    accessor.write(SLOT, 41).unwrap();

    let value = registry.resolve(Tier::Callable, "value").unwrap();
    assert_eq!(value.call(&mut accessor).unwrap(), Outcome::U64(41));

    let init = registry.lifecycle_initializer().unwrap().unwrap();
    assert_eq!(init.call(&mut accessor).unwrap(), Outcome::Unit);
}

#[test]
fn test_outcome_marshaling() {
    let bytes = Outcome::U64(7).to_bytes();
    assert_eq!(Outcome::from_bytes(&bytes).unwrap(), Outcome::U64(7));
    assert_eq!(Outcome::U64(7).as_u64(), Some(7));
    assert_eq!(Outcome::Unit.as_u64(), None);
    assert_eq!(Outcome::U64(12).to_string(), "12");
}
