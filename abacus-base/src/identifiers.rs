// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core identifiers used by contracts and hosts.

use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The trust tier of a contract operation.
///
/// Every operation descriptor carries exactly one tier. Lifecycle operations are only ever
/// invoked by the host, at defined points of the contract's life. Callable operations
/// are reachable through the host's public dispatch path.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Tier {
    /// Invoked by the host only (the `SYSTEM` set).
    Lifecycle,
    /// Invoked by external callers (the `PUBLIC` set).
    Callable,
}

impl Tier {
    /// Returns the other tier.
    pub fn other(self) -> Tier {
        match self {
            Tier::Lifecycle => Tier::Callable,
            Tier::Callable => Tier::Lifecycle,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Lifecycle => write!(f, "SYSTEM"),
            Tier::Callable => write!(f, "PUBLIC"),
        }
    }
}

/// A key identifying one slot in a host-owned key-value store.
///
/// Keys are opaque to contracts: uniqueness and ordering are the store's concern.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StateKey(&'static [u8]);

impl StateKey {
    /// Creates a key from a static byte string, usable in constants.
    pub const fn new(bytes: &'static [u8]) -> Self {
        StateKey(bytes)
    }

    /// Returns the raw bytes of the key.
    pub const fn as_bytes(&self) -> &'static [u8] {
        self.0
    }
}

impl AsRef<[u8]> for StateKey {
    fn as_ref(&self) -> &[u8] {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateKey({})", hex::encode(self.0))
    }
}

/// The name under which a contract is deployed on a host.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ContractName(String);

/// An error caused by an invalid [`ContractName`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum InvalidContractName {
    /// The name is empty.
    #[error("Contract names must not be empty")]
    Empty,
    /// The name contains a character outside of `[A-Za-z0-9_-]`.
    #[error("Contract name {name:?} contains the invalid character {character:?}")]
    InvalidCharacter {
        /// The rejected name.
        name: String,
        /// The first offending character.
        character: char,
    },
}

impl ContractName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the key prefix isolating this contract's state inside a shared store.
    ///
    /// The prefix is the name followed by a `/` separator. Since names cannot contain
    /// `/`, no two contracts share a prefix.
    pub fn state_prefix(&self) -> Vec<u8> {
        let mut prefix = Vec::with_capacity(self.0.len() + 1);
        prefix.extend_from_slice(self.0.as_bytes());
        prefix.push(b'/');
        prefix
    }
}

impl FromStr for ContractName {
    type Err = InvalidContractName;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        crate::ensure!(!name.is_empty(), InvalidContractName::Empty);
        if let Some(character) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(InvalidContractName::InvalidCharacter {
                name: name.to_owned(),
                character,
            });
        }
        Ok(ContractName(name.to_owned()))
    }
}

impl Borrow<str> for ContractName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
