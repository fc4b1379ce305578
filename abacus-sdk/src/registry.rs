// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The registry mapping operation names to their implementations.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    fmt,
    sync::Arc,
};

use abacus_base::{ensure, identifiers::Tier};
use abacus_storage::StateAccessor;

use crate::{ContractError, Outcome, RegistryError, INIT_OPERATION};

/// The implementation of a contract operation.
///
/// The state accessor of the current invocation is passed explicitly, so operations can
/// be run against any store, including test stores without a host.
#[derive(Clone)]
pub struct Operation(
    Arc<dyn Fn(&mut dyn StateAccessor) -> Result<Outcome, ContractError> + Send + Sync>,
);

impl Operation {
    /// Wraps a function or closure as an operation.
    pub fn new<F, O>(function: F) -> Self
    where
        F: Fn(&mut dyn StateAccessor) -> Result<O, ContractError> + Send + Sync + 'static,
        O: Into<Outcome>,
    {
        Operation(Arc::new(
            move |state: &mut dyn StateAccessor| -> Result<Outcome, ContractError> {
                function(state).map(Into::into)
            },
        ))
    }

    /// Runs the operation against `state`.
    pub fn call(&self, state: &mut dyn StateAccessor) -> Result<Outcome, ContractError> {
        (self.0)(state)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Operation(..)")
    }
}

/// A named operation and the tier allowed to invoke it.
#[derive(Clone, Debug)]
pub struct OperationDescriptor {
    /// The name of the operation.
    pub name: String,
    /// The tier of the operation.
    pub tier: Tier,
    /// The implementation.
    pub operation: Operation,
}

impl OperationDescriptor {
    /// Describes an operation only the host may invoke.
    pub fn lifecycle(name: impl Into<String>, operation: Operation) -> Self {
        OperationDescriptor {
            name: name.into(),
            tier: Tier::Lifecycle,
            operation,
        }
    }

    /// Describes an operation reachable by external callers.
    pub fn callable(name: impl Into<String>, operation: Operation) -> Self {
        OperationDescriptor {
            name: name.into(),
            tier: Tier::Callable,
            operation,
        }
    }
}

/// Collects the operations of a contract while it is being loaded.
///
/// Names are unique across both tiers, and the initializer name is only accepted under
/// the lifecycle tier. Once [`OperationRegistryBuilder::build`] is called
/// the registry is frozen: [`OperationRegistry`] has no way to register further
/// operations.
#[derive(Debug, Default)]
pub struct OperationRegistryBuilder {
    operations: BTreeMap<String, (Tier, Operation)>,
}

impl OperationRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `name` with `operation` under `tier`.
    pub fn register(
        &mut self,
        tier: Tier,
        name: impl Into<String>,
        operation: Operation,
    ) -> Result<&mut Self, RegistryError> {
        let name = name.into();
        ensure!(
            tier == Tier::Lifecycle || name != INIT_OPERATION,
            RegistryError::ReservedName(name)
        );
        match self.operations.entry(name) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateName {
                name: entry.key().clone(),
                existing: entry.get().0,
            }),
            Entry::Vacant(entry) => {
                entry.insert((tier, operation));
                Ok(self)
            }
        }
    }

    /// Freezes the registry.
    pub fn build(self) -> OperationRegistry {
        OperationRegistry {
            operations: self.operations,
        }
    }
}

/// The read-only table of a loaded contract's operations.
#[derive(Clone, Debug)]
pub struct OperationRegistry {
    operations: BTreeMap<String, (Tier, Operation)>,
}

impl OperationRegistry {
    /// Builds a registry from a fixed list of descriptors.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = OperationDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut builder = OperationRegistryBuilder::new();
        for descriptor in descriptors {
            builder.register(descriptor.tier, descriptor.name, descriptor.operation)?;
        }
        Ok(builder.build())
    }

    /// Returns the implementation of `name` if it is registered under `tier`.
    pub fn resolve(&self, tier: Tier, name: &str) -> Result<&Operation, RegistryError> {
        let (registered, operation) = self
            .operations
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))?;
        ensure!(
            *registered == tier,
            RegistryError::WrongTier {
                name: name.to_owned(),
                requested: tier,
                registered: *registered,
            }
        );
        Ok(operation)
    }

    /// Returns the names registered under `tier`, in sorted order.
    pub fn names(&self, tier: Tier) -> impl Iterator<Item = &str> + '_ {
        self.operations
            .iter()
            .filter(move |(_, (registered, _))| *registered == tier)
            .map(|(name, _)| name.as_str())
    }

    /// Returns the lifecycle initializer, if the contract declares one.
    pub fn lifecycle_initializer(&self) -> Result<Option<&Operation>, RegistryError> {
        match self.resolve(Tier::Lifecycle, INIT_OPERATION) {
            Ok(operation) => Ok(Some(operation)),
            Err(RegistryError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Returns the number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
#[path = "unit_tests/registry_tests.rs"]
mod registry_tests;
