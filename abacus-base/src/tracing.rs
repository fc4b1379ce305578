// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides unified handling for tracing subscribers within Abacus binaries.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    filter::LevelFilter, fmt::format::FmtSpan, layer::SubscriberExt as _,
    util::SubscriberInitExt as _, EnvFilter, Layer as _,
};

/// Initializes tracing in a standard way.
///
/// The environment variables `RUST_LOG`, `RUST_LOG_SPAN_EVENTS`, and `RUST_LOG_FORMAT`
/// can be used to control the verbosity, the span event verbosity, and the output format,
/// respectively. `log_name` identifies the process in the first event logged.
pub fn init(log_name: &str) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let span_events = std::env::var("RUST_LOG_SPAN_EVENTS")
        .ok()
        .map_or(FmtSpan::NONE, |s| fmt_span_from_str(&s));

    let color_output =
        !std::env::var("NO_COLOR").is_ok_and(|x| !x.is_empty()) && std::io::stderr().is_terminal();

    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(span_events)
        .with_writer(std::io::stderr)
        .with_ansi(color_output);

    let layer = match std::env::var("RUST_LOG_FORMAT").ok().as_deref() {
        Some("compact") => layer.compact().boxed(),
        Some("pretty") => layer.pretty().boxed(),
        Some("plain") | None => layer.boxed(),
        Some(other) => {
            eprintln!("Unknown RUST_LOG_FORMAT {other:?}, falling back to \"plain\"");
            layer.boxed()
        }
    };

    let initialized = tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init();

    if initialized.is_ok() {
        ::tracing::debug!(process = log_name, "Tracing initialized");
    }
}

fn fmt_span_from_str(events: &str) -> FmtSpan {
    let mut fmt_span = FmtSpan::NONE;
    for event in events.split(',') {
        fmt_span |= match event.trim() {
            "new" => FmtSpan::NEW,
            "enter" => FmtSpan::ENTER,
            "exit" => FmtSpan::EXIT,
            "close" => FmtSpan::CLOSE,
            "active" => FmtSpan::ACTIVE,
            "full" => FmtSpan::FULL,
            _ => FmtSpan::NONE,
        };
    }
    fmt_span
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::fmt_span_from_str;

    #[test]
    fn span_events_are_combined() {
        assert_eq!(fmt_span_from_str("new,close"), FmtSpan::NEW | FmtSpan::CLOSE);
        assert_eq!(fmt_span_from_str("bogus"), FmtSpan::NONE);
        assert_eq!(fmt_span_from_str(" full "), FmtSpan::FULL);
    }
}
