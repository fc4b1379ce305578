// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value returned by a successful operation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Outcome {
    /// The operation returns nothing.
    Unit,
    /// The operation returns an unsigned 64-bit integer.
    U64(u64),
}

impl Outcome {
    /// Returns the number carried by the outcome, if any.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Outcome::Unit => None,
            Outcome::U64(value) => Some(*value),
        }
    }

    /// Marshals the outcome for the host's result channel.
    pub fn to_bytes(&self) -> Vec<u8> {
        bcs::to_bytes(self).expect("Serializing an outcome should not fail")
    }

    /// Unmarshals an outcome produced by [`Outcome::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bcs::Error> {
        bcs::from_bytes(bytes)
    }
}

impl From<u64> for Outcome {
    fn from(value: u64) -> Self {
        Outcome::U64(value)
    }
}

impl From<()> for Outcome {
    fn from((): ()) -> Self {
        Outcome::Unit
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unit => f.write_str("()"),
            Outcome::U64(value) => write!(f, "{value}"),
        }
    }
}
