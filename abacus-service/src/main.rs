// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A command-line host for the Counter contract.

mod command;
mod state_file;

use std::path::PathBuf;

use abacus_execution::{ContractHost, ExecutionConfig};
use abacus_storage::MemoryStore;
use counter::CounterContract;

use crate::{command::HostCommand, state_file::StateFile};

#[derive(clap::Parser)]
#[command(
    name = "abacus",
    version = clap::crate_version!(),
    about = "Runs the operations of an Abacus contract against a local state file"
)]
struct HostOptions {
    /// The JSON file holding the contract state. Without it, state only lives for the
    /// duration of the command.
    #[arg(long = "state", env = "ABACUS_STATE")]
    state_path: Option<PathBuf>,

    #[command(flatten)]
    execution_config: ExecutionConfig,

    /// Subcommand.
    #[command(subcommand)]
    command: HostCommand,
}

fn main() -> anyhow::Result<()> {
    abacus_base::tracing::init("abacus");
    let options = <HostOptions as clap::Parser>::parse();

    let state_file = options.state_path.map(StateFile::new);
    let store = match &state_file {
        Some(file) => file.load()?,
        None => MemoryStore::default(),
    };

    let host = ContractHost::new(store, options.execution_config);
    let contract = host.deploy::<CounterContract>()?;

    options.command.run_and_save(
        &host,
        contract.as_str(),
        state_file.as_ref(),
        &mut std::io::stdout().lock(),
    )
}
