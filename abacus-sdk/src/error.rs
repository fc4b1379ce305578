// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use abacus_base::identifiers::{StateKey, Tier};
use abacus_storage::StateError;
use thiserror::Error;

/// An error in the declaration of a contract's operations, or in the resolution of an
/// operation name.
///
/// These are programming errors detected when the contract is loaded or a call is
/// dispatched; they are never recovered from inside the contract.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RegistryError {
    /// The name is already registered, in either tier.
    #[error("Operation {name:?} is already registered as a {existing} operation")]
    DuplicateName {
        /// The operation name.
        name: String,
        /// The tier of the existing registration.
        existing: Tier,
    },

    /// The name is reserved for the lifecycle initializer and cannot be exposed to
    /// external callers.
    #[error("Operation name {0:?} is reserved for the lifecycle tier")]
    ReservedName(String),

    /// No operation with this name is registered.
    #[error("Operation {0:?} not found")]
    NotFound(String),

    /// The operation is registered under the other tier.
    #[error("Operation {name:?} is a {registered} operation and cannot be invoked as {requested}")]
    WrongTier {
        /// The operation name.
        name: String,
        /// The tier the caller asked for.
        requested: Tier,
        /// The tier the operation is registered under.
        registered: Tier,
    },
}

/// An error returned by a contract operation. It is surfaced verbatim to the host as an
/// invocation failure.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The state accessor failed.
    #[error(transparent)]
    State(#[from] StateError),

    /// An arithmetic update would leave the range of 64-bit values.
    #[error("Arithmetic overflow while updating the value at key {key}")]
    Overflow {
        /// The key whose value could not be updated.
        key: StateKey,
    },
}
