// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides the definitions shared by Abacus contracts and the hosts that
//! execute them.

#![deny(missing_docs)]

mod ensure;
pub mod encoding;
pub mod identifiers;
pub mod tracing;

#[cfg(test)]
#[path = "unit_tests/base_tests.rs"]
mod base_tests;
