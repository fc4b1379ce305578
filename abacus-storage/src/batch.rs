// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A set of write operations that can be applied to a store as a unit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A write operation as requested by a contract.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum WriteOperation {
    /// Set the value of the given key.
    Put {
        /// The key that will be written.
        key: Vec<u8>,
        /// The value that will be written.
        value: Vec<u8>,
    },
}

impl fmt::Debug for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOperation::Put { key, value } => f
                .debug_struct("Put")
                .field("key", &hex::encode(key))
                .field("value", &hex::encode(value))
                .finish(),
        }
    }
}

/// A batch of write operations, applied in order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// The write operations.
    pub operations: Vec<WriteOperation>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the batch holds no operation.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns the number of operations in the batch.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Inserts a put of `value` at `key` in the batch.
    pub fn put_key_value_bytes(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.operations.push(WriteOperation::Put { key, value });
    }
}
