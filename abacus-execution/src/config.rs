// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use abacus_base::encoding::ByteOrder;
use serde::{Deserialize, Serialize};

/// The configuration of a [`ContractHost`](crate::ContractHost).
#[derive(Clone, Debug, Default, Eq, PartialEq, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionConfig {
    /// The byte order of 64-bit values in the host store. Must match the store's
    /// encoding, since a mismatch silently corrupts stored numbers.
    #[serde(default)]
    #[arg(
        long = "byte-order",
        value_enum,
        default_value_t = ByteOrder::Little,
        env = "ABACUS_BYTE_ORDER"
    )]
    pub byte_order: ByteOrder,
}
