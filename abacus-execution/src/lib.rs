// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module manages the execution of Abacus contracts on behalf of a host.
//!
//! A [`ContractHost`] deploys contracts into a shared key-value store, runs each
//! contract's lifecycle initializer exactly once, and dispatches callable operations,
//! one at a time per contract.

#![deny(missing_docs)]

mod config;
mod host;

use abacus_base::identifiers::{ContractName, InvalidContractName};
use abacus_sdk::{ContractError, RegistryError, StateError};
use thiserror::Error;

pub use crate::{
    config::ExecutionConfig,
    host::{ContractHost, OperationSet},
};

/// A failure to deploy a contract or to execute one of its operations.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// No contract is deployed under this name.
    #[error("Contract {0:?} is not deployed")]
    UnknownContract(String),

    /// A contract is already deployed under this name.
    #[error("A contract named {0} is already deployed")]
    ContractAlreadyDeployed(ContractName),

    /// The contract declares an invalid name.
    #[error(transparent)]
    InvalidContractName(#[from] InvalidContractName),

    /// The operation could not be resolved, or the contract's operations are
    /// ill-declared.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The operation failed.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The writes of a successful operation could not be committed.
    #[error(transparent)]
    Storage(#[from] StateError),
}
