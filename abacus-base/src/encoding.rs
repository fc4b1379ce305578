// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The fixed-width encoding of 64-bit values in host stores.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The number of bytes used to store a `u64` value.
pub const U64_ENCODED_LENGTH: usize = 8;

/// The byte order a host store uses for 64-bit values.
///
/// Contracts must agree with the host on this: a mismatch silently corrupts every stored
/// number instead of failing.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// An error caused by bytes that do not hold an encoded value.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum EncodingError {
    /// The stored value does not have the fixed width.
    #[error("Expected an encoded value of {expected} bytes, found {found} bytes")]
    InvalidLength {
        /// The fixed width of the encoding.
        expected: usize,
        /// The length of the bytes found in the store.
        found: usize,
    },
}

impl ByteOrder {
    /// Encodes `value` into its fixed-width representation.
    pub fn encode_u64(self, value: u64) -> [u8; U64_ENCODED_LENGTH] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    /// Decodes a value previously written with [`ByteOrder::encode_u64`].
    pub fn decode_u64(self, bytes: &[u8]) -> Result<u64, EncodingError> {
        let bytes: [u8; U64_ENCODED_LENGTH] =
            bytes.try_into().map_err(|_| EncodingError::InvalidLength {
                expected: U64_ENCODED_LENGTH,
                found: bytes.len(),
            })?;
        Ok(match self {
            ByteOrder::Little => u64::from_le_bytes(bytes),
            ByteOrder::Big => u64::from_be_bytes(bytes),
        })
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => f.write_str("little"),
            ByteOrder::Big => f.write_str("big"),
        }
    }
}

/// An error caused by an unknown byte order name.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("Unknown byte order {0:?}, expected \"little\" or \"big\"")]
pub struct UnknownByteOrder(String);

impl FromStr for ByteOrder {
    type Err = UnknownByteOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "little" => Ok(ByteOrder::Little),
            "big" => Ok(ByteOrder::Big),
            other => Err(UnknownByteOrder(other.to_owned())),
        }
    }
}
