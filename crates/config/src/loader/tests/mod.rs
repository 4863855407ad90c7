//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test explicit construction and default filling.
//! - Test environment variable handling, precedence and source tracking.
//! - Test `.env` file loading and its precedence below the process environment.
//! - Test URL and credential validation.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

use crate::types::Field;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable the loader reads, unset, followed by `overrides`.
///
/// Passing the result to `temp_env::with_vars` isolates a test from whatever
/// the host environment happens to define.
pub fn isolated_vars<'a>(overrides: &[(&'a str, &'a str)]) -> Vec<(&'a str, Option<&'a str>)> {
    let mut vars: Vec<(&str, Option<&str>)> = Field::ALL
        .iter()
        .map(|field| (field.env_var(), None))
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o == name))
        .collect();
    if !overrides.iter().any(|(name, _)| *name == "DOTENV_DISABLED") {
        vars.push(("DOTENV_DISABLED", Some("1")));
    }
    vars.extend(overrides.iter().map(|(k, v)| (*k, Some(*v))));
    vars
}
