// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/*! A contract keeping a single 64-bit counter.

The counter starts at zero (the value of a key that was never written) and only moves
through `inc`. Incrementing past `u64::MAX` fails with [`ContractError::Overflow`] and
leaves the stored value unchanged. */

use abacus_sdk::{
    Contract, ContractError, Operation, OperationDescriptor, StateAccessor, StateKey,
    INIT_OPERATION,
};

/// The key of the counter slot.
pub const COUNTER_KEY: StateKey = StateKey::new(b"counter");

/// The counter contract.
pub struct CounterContract;

impl Contract for CounterContract {
    const NAME: &'static str = "Counter";

    fn descriptors() -> Vec<OperationDescriptor> {
        vec![
            OperationDescriptor::lifecycle(INIT_OPERATION, Operation::new(init)),
            OperationDescriptor::callable("inc", Operation::new(inc)),
            OperationDescriptor::callable("value", Operation::new(value)),
        ]
    }
}

/// Reserved for future schema setup. Always succeeds.
pub fn init(_state: &mut dyn StateAccessor) -> Result<(), ContractError> {
    Ok(())
}

/// Increments the counter and returns its new value.
pub fn inc(state: &mut dyn StateAccessor) -> Result<u64, ContractError> {
    let current = value(state)?;
    let next = current
        .checked_add(1)
        .ok_or(ContractError::Overflow { key: COUNTER_KEY })?;
    state.write(COUNTER_KEY, next)?;
    tracing::debug!(from = current, to = next, "Counter incremented");
    Ok(next)
}

/// Returns the current value of the counter.
pub fn value(state: &mut dyn StateAccessor) -> Result<u64, ContractError> {
    Ok(state.read(COUNTER_KEY)?)
}

#[cfg(test)]
mod tests {
    use abacus_sdk::{Contract, ContractError, Outcome, RegistryError, StateAccessor, Tier};
    use abacus_storage::test_utils::{memory_accessor, FailingStore};
    use abacus_storage::{StateError, StoreAccessor};
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::{inc, init, value, CounterContract, COUNTER_KEY};

    #[test_log::test]
    fn value_of_empty_store_is_zero() {
        let mut state = memory_accessor();
        assert_eq!(value(&mut state).unwrap(), 0);
    }

    #[test_log::test]
    fn increments_are_observed_by_value() {
        let mut state = memory_accessor();

        assert_eq!(inc(&mut state).unwrap(), 1);
        assert_eq!(value(&mut state).unwrap(), 1);
        assert_eq!(inc(&mut state).unwrap(), 2);
        assert_eq!(value(&mut state).unwrap(), 2);
    }

    #[test_log::test]
    fn value_is_idempotent_and_inc_is_not() {
        let mut state = memory_accessor();
        inc(&mut state).unwrap();

        assert_eq!(value(&mut state).unwrap(), value(&mut state).unwrap());

        let first = inc(&mut state).unwrap();
        let second = inc(&mut state).unwrap();
        assert_eq!(second, first + 1);
    }

    #[test_log::test]
    fn init_does_not_touch_state() {
        let mut state = memory_accessor();
        init(&mut state).unwrap();
        assert!(state.store().snapshot().is_empty());
    }

    #[test_log::test]
    fn overflow_fails_and_keeps_the_maximum() {
        let mut state = memory_accessor();
        state.write(COUNTER_KEY, u64::MAX).unwrap();

        assert_matches!(
            inc(&mut state),
            Err(ContractError::Overflow { key }) if key == COUNTER_KEY
        );
        assert_eq!(value(&mut state).unwrap(), u64::MAX);
    }

    #[test_log::test]
    fn increment_below_the_maximum_reaches_it() {
        let mut state = memory_accessor();
        state.write(COUNTER_KEY, u64::MAX - 1).unwrap();
        assert_eq!(inc(&mut state).unwrap(), u64::MAX);
    }

    #[test_log::test]
    fn storage_failures_are_surfaced() {
        let store = FailingStore::default();
        let mut state = StoreAccessor::new(store.clone(), Default::default());

        store.fail_writes(true);
        assert_matches!(
            inc(&mut state),
            Err(ContractError::State(StateError::StorageUnavailable { .. }))
        );

        store.fail_writes(false);
        store.fail_reads(true);
        assert_matches!(
            value(&mut state),
            Err(ContractError::State(StateError::StorageUnavailable { .. }))
        );

        store.fail_reads(false);
        assert_eq!(value(&mut state).unwrap(), 0);
    }

    #[test]
    fn registry_partitions_operations() {
        let registry = CounterContract::registry().unwrap();

        assert_eq!(
            registry.names(Tier::Callable).collect::<Vec<_>>(),
            vec!["inc", "value"]
        );
        assert_eq!(
            registry.names(Tier::Lifecycle).collect::<Vec<_>>(),
            vec!["_init"]
        );
        assert_matches!(
            registry.resolve(Tier::Lifecycle, "inc"),
            Err(RegistryError::WrongTier { .. })
        );
        assert_matches!(
            registry.resolve(Tier::Callable, "missing"),
            Err(RegistryError::NotFound(_))
        );
    }

    #[test]
    fn registry_dispatches_to_the_counter() {
        let registry = CounterContract::registry().unwrap();
        let mut state = memory_accessor();

        let inc = registry.resolve(Tier::Callable, "inc").unwrap();
        assert_eq!(inc.call(&mut state).unwrap(), Outcome::U64(1));
        assert_eq!(inc.call(&mut state).unwrap(), Outcome::U64(2));

        let value = registry.resolve(Tier::Callable, "value").unwrap();
        assert_eq!(value.call(&mut state).unwrap(), Outcome::U64(2));
    }

    proptest! {
        #[test]
        fn kth_increment_returns_k(count in 1u64..200) {
            let mut state = memory_accessor();
            for k in 1..=count {
                prop_assert_eq!(inc(&mut state).unwrap(), k);
            }
            prop_assert_eq!(value(&mut state).unwrap(), count);
        }

        #[test]
        fn increments_continue_from_any_start(start in 0u64..u64::MAX) {
            let mut state = memory_accessor();
            state.write(COUNTER_KEY, start).unwrap();
            prop_assert_eq!(inc(&mut state).unwrap(), start + 1);
            prop_assert_eq!(value(&mut state).unwrap(), start + 1);
        }
    }
}
