//! # Tour Common
//!
//! Plumbing shared by the lesson demo binaries.
//!
//! The lesson crates themselves only emit `tracing` events; whether anything
//! is printed is decided here, once per process, by [`init_tracing`].
//! Log output goes to stderr so that the demos' stdout matches the programs
//! they reproduce line for line.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber with [`DEFAULT_FILTER`] as fallback.
///
/// `RUST_LOG=tour_flowcontrol=trace` shows every Newton step, for example.
pub fn init_tracing() -> Result<(), TryInitError> {
    init_tracing_with(DEFAULT_FILTER)
}

/// Installs the global subscriber, falling back to `default_directive`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing_with(default_directive: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(env_filter)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // Either this test or another in the process installs first; the
        // second attempt must report an error instead of panicking.
        let _ = init_tracing_with("debug");
        assert!(init_tracing().is_err());
    }
}
