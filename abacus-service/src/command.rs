// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The subcommands of the `abacus` binary.

use std::io::Write;

use abacus_execution::ContractHost;
use abacus_storage::MemoryStore;
use anyhow::Context as _;

use crate::state_file::StateFile;

#[derive(Clone, Debug, clap::Subcommand)]
pub enum HostCommand {
    /// Print the PUBLIC and SYSTEM operations of the contract.
    Operations,

    /// Execute callable operations in order, committing their writes.
    Execute {
        /// The operations to execute.
        #[arg(required = true)]
        operations: Vec<String>,
    },

    /// Run a callable operation without committing its writes.
    Query {
        /// The operation to run.
        operation: String,
    },
}

impl HostCommand {
    /// Runs the command against `contract` and then saves the store to `state_file`.
    ///
    /// The store is saved even when the command fails: operations committed before the
    /// failure are kept, and a failed operation commits nothing.
    pub fn run_and_save(
        &self,
        host: &ContractHost<MemoryStore>,
        contract: &str,
        state_file: Option<&StateFile>,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let result = self.run(host, contract, output);
        if let Some(file) = state_file {
            file.save(host.store())?;
            tracing::info!(path = %file.path().display(), contract, "State saved");
        }
        result
    }

    fn run(
        &self,
        host: &ContractHost<MemoryStore>,
        contract: &str,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        match self {
            HostCommand::Operations => {
                let operations = host.operations(contract)?;
                writeln!(output, "PUBLIC: {}", operations.public.join(", "))?;
                writeln!(output, "SYSTEM: {}", operations.system.join(", "))?;
            }
            HostCommand::Execute { operations } => {
                for operation in operations {
                    let outcome = host
                        .execute(contract, operation)
                        .with_context(|| format!("Failed to execute {operation:?}"))?;
                    writeln!(output, "{operation}: {outcome}")?;
                }
            }
            HostCommand::Query { operation } => {
                let outcome = host
                    .query(contract, operation)
                    .with_context(|| format!("Failed to query {operation:?}"))?;
                writeln!(output, "{operation}: {outcome}")?;
            }
        }
        Ok(())
    }
}
