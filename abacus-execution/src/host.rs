// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use abacus_base::identifiers::{ContractName, Tier};
use abacus_sdk::{Contract, Operation, OperationRegistry, Outcome, StateError};
use abacus_storage::{
    Batch, OverlayStore, PrefixedStore, ReadableKeyValueStore, StoreAccessor,
    WritableKeyValueStore,
};
use serde::{Deserialize, Serialize};

use crate::{ExecutionConfig, ExecutionError};

/// Host metadata lives under this prefix. Contract names cannot contain a NUL byte, so
/// these keys never fall inside a contract's namespace.
const DEPLOYMENT_MARKER_PREFIX: &[u8] = b"\0deployed/";

/// The operation names of a deployed contract, partitioned by tier.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct OperationSet {
    /// The callable operations.
    pub public: Vec<String>,
    /// The lifecycle operations.
    pub system: Vec<String>,
}

impl OperationSet {
    fn of(registry: &OperationRegistry) -> Self {
        OperationSet {
            public: registry.names(Tier::Callable).map(str::to_owned).collect(),
            system: registry.names(Tier::Lifecycle).map(str::to_owned).collect(),
        }
    }
}

/// A contract loaded into a [`ContractHost`].
struct DeployedContract {
    name: ContractName,
    registry: OperationRegistry,
    /// Held for the whole of each invocation: calls against the same state never
    /// interleave. Only guards `()`, so poisoning is ignored.
    execution_lock: Mutex<()>,
}

/// Whether the writes of an invocation reach the store.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Commit {
    Yes,
    No,
}

/// Executes contracts against a shared key-value store.
///
/// Each deployed contract sees its own key space, and invocations on the same contract
/// are serialized. The writes of an invocation are buffered and only reach the store once
/// the invocation has succeeded, so a failed call leaves the state exactly as it was.
pub struct ContractHost<S> {
    store: S,
    config: ExecutionConfig,
    contracts: RwLock<BTreeMap<ContractName, Arc<DeployedContract>>>,
}

impl<S> ContractHost<S>
where
    S: ReadableKeyValueStore + WritableKeyValueStore,
{
    /// Creates a host without any deployed contract.
    pub fn new(store: S, config: ExecutionConfig) -> Self {
        ContractHost {
            store,
            config,
            contracts: RwLock::default(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the configuration of the host.
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Loads the contract `C`.
    ///
    /// The contract's registry is built first; a malformed registry aborts the load. The
    /// lifecycle initializer then runs, unless the store shows that the contract was
    /// already initialized by an earlier host. A failing initializer fails the
    /// deployment and leaves the store untouched.
    pub fn deploy<C: Contract>(&self) -> Result<ContractName, ExecutionError> {
        let name: ContractName = C::NAME.parse()?;
        let _span = tracing::info_span!("deploy", contract = %name).entered();

        let mut contracts = self
            .contracts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // The table is only updated once the initializer has succeeded.
        if contracts.contains_key(&name) {
            return Err(ExecutionError::ContractAlreadyDeployed(name));
        }

        let registry = C::registry()?;
        let operations = OperationSet::of(&registry);
        tracing::info!(
            public = ?operations.public,
            system = ?operations.system,
            "Loaded contract operations"
        );

        let marker_key = deployment_marker(&name);
        let already_initialized = self
            .store
            .read_value_bytes(&marker_key)
            .map_err(StateError::storage)?
            .is_some();

        if already_initialized {
            tracing::info!("Contract state already initialized, skipping the initializer");
        } else {
            let mut batch = match registry.lifecycle_initializer()? {
                Some(initializer) => self.run(&name, initializer)?.1,
                None => Batch::new(),
            };
            batch.put_key_value_bytes(marker_key, vec![1]);
            self.store
                .write_batch(batch)
                .map_err(StateError::storage)?;
            tracing::info!("Contract initialized");
        }

        contracts.insert(
            name.clone(),
            Arc::new(DeployedContract {
                name: name.clone(),
                registry,
                execution_lock: Mutex::new(()),
            }),
        );
        Ok(name)
    }

    /// Returns the names of the deployed contracts.
    pub fn deployed_contracts(&self) -> Vec<ContractName> {
        self.contracts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Returns the public and system operations of a deployed contract.
    pub fn operations(&self, contract: &str) -> Result<OperationSet, ExecutionError> {
        Ok(OperationSet::of(&self.contract(contract)?.registry))
    }

    /// Executes a callable operation as a transaction: its writes are committed if, and
    /// only if, it succeeds.
    pub fn execute(&self, contract: &str, operation: &str) -> Result<Outcome, ExecutionError> {
        self.invoke(contract, operation, Commit::Yes)
    }

    /// Executes a callable operation as a read-only query: its writes are discarded.
    pub fn query(&self, contract: &str, operation: &str) -> Result<Outcome, ExecutionError> {
        self.invoke(contract, operation, Commit::No)
    }

    fn contract(&self, contract: &str) -> Result<Arc<DeployedContract>, ExecutionError> {
        self.contracts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(contract)
            .cloned()
            .ok_or_else(|| ExecutionError::UnknownContract(contract.to_owned()))
    }

    fn invoke(
        &self,
        contract: &str,
        operation_name: &str,
        commit: Commit,
    ) -> Result<Outcome, ExecutionError> {
        let deployed = self.contract(contract)?;
        let _span = tracing::debug_span!(
            "invoke",
            contract = %deployed.name,
            operation = operation_name,
            ?commit
        )
        .entered();

        let operation = deployed
            .registry
            .resolve(Tier::Callable, operation_name)
            .inspect_err(|error| tracing::warn!(%error, "Rejected invocation"))?;

        // A panicking operation commits nothing, so the state behind a poisoned lock is
        // still consistent.
        let _guard = deployed
            .execution_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (outcome, batch) = self
            .run(&deployed.name, operation)
            .inspect_err(|error| tracing::warn!(%error, "Invocation failed"))?;
        if commit == Commit::Yes && !batch.is_empty() {
            self.store
                .write_batch(batch)
                .map_err(StateError::storage)?;
        }
        tracing::debug!(%outcome, "Invocation succeeded");
        Ok(outcome)
    }

    /// Runs `operation` in the namespace of `name`, returning its outcome together with
    /// the writes it made. Nothing reaches the store here.
    fn run(
        &self,
        name: &ContractName,
        operation: &Operation,
    ) -> Result<(Outcome, Batch), ExecutionError> {
        let mut accessor = StoreAccessor::new(
            PrefixedStore::new(OverlayStore::new(&self.store), name.state_prefix()),
            self.config.byte_order,
        );
        let outcome = operation.call(&mut accessor)?;
        let batch = accessor.into_store().into_inner().into_batch();
        Ok((outcome, batch))
    }
}

fn deployment_marker(name: &ContractName) -> Vec<u8> {
    let mut key = DEPLOYMENT_MARKER_PREFIX.to_vec();
    key.extend_from_slice(name.as_str().as_bytes());
    key
}
