// Copyright (c) Facebook, Inc. and its affiliates.
// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/// Returns early with the given error, converted with [`Into`], if the condition does
/// not hold.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error:expr $(,)?) => {
        if !($cond) {
            return Err($error.into());
        }
    };
}
