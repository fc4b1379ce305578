// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides an SDK for developing Abacus contracts.
//!
//! A contract is a type implementing [`Contract`]. It declares, once, the list of
//! [`OperationDescriptor`]s it exposes, each tagged with the [`Tier`] that is allowed to
//! invoke it. The host turns that list into an [`OperationRegistry`] when it loads the
//! contract, and afterwards only resolves names against it.
//!
//! Operations receive the [`StateAccessor`] for the current invocation as an explicit
//! argument: there is no ambient state.

#![deny(missing_docs)]

mod error;
mod outcome;
pub mod registry;

pub use abacus_base::{
    encoding::ByteOrder,
    identifiers::{StateKey, Tier},
};
pub use abacus_storage::{StateAccessor, StateError};

pub use crate::{
    error::{ContractError, RegistryError},
    outcome::Outcome,
    registry::{Operation, OperationDescriptor, OperationRegistry, OperationRegistryBuilder},
};

/// The name of the lifecycle operation the host runs once, when the contract is loaded.
pub const INIT_OPERATION: &str = "_init";

/// The entry points of a contract, as seen by a host.
pub trait Contract {
    /// The name under which the contract is deployed.
    const NAME: &'static str;

    /// Returns the fixed list of operations exposed by the contract.
    fn descriptors() -> Vec<OperationDescriptor>;

    /// Builds the registry of the contract's operations.
    ///
    /// Fails if two descriptors share a name, in which case the contract must not be
    /// loaded.
    fn registry() -> Result<OperationRegistry, RegistryError> {
        OperationRegistry::from_descriptors(Self::descriptors())
    }
}
