//! Configuration loader for explicit values, environment variables and `.env` files.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration resolution.
//! - Provide `ValidatedParams::from_env` and `load_env_into` for the common
//!   environment-only path.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//! - Keep a broken `.env` file from blocking `ValidatedParams::from_env`.
//!
//! Does NOT handle:
//! - Owning transport resources or refreshing tokens (see client crate).
//!
//! Invariants / Assumptions:
//! - Builder values > process environment > `.env` file > defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - `load_env_into` either fully replaces the target or leaves it untouched.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

use crate::types::ValidatedParams;

impl ValidatedParams {
    /// Resolve a parameter set from the environment.
    ///
    /// Variables are read from the process environment, falling back to a
    /// `.env` file in the current directory when present. See
    /// [`crate::constants`] for the variable names.
    ///
    /// An unreadable or malformed `.env` file is logged and skipped, so a
    /// complete process environment always resolves. Use
    /// [`ConfigLoader::load_dotenv`] to treat it as an error instead.
    ///
    /// The names are unprefixed, and `LANGUAGE` is also the POSIX gettext
    /// variable (e.g. `en_US:en`), which fails as `InvalidEnumValue`. Hosts
    /// that set it should use a prefix instead:
    ///
    /// ```ignore
    /// let params = ConfigLoader::new()
    ///     .with_env_prefix("LONGPORT_")
    ///     .load_dotenv()?
    ///     .from_env()?
    ///     .build()?;
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        let loader = match ConfigLoader::new().load_dotenv() {
            Ok(loader) => loader,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unusable .env file");
                ConfigLoader::new()
            }
        };
        loader.from_env()?.build()
    }
}

/// Resolve a parameter set from the environment into `target`.
///
/// On success `target` is replaced. On failure it is left exactly as it was,
/// so a previously valid configuration survives a bad reload.
pub fn load_env_into(target: &mut Option<ValidatedParams>) -> Result<(), ConfigError> {
    match ValidatedParams::from_env() {
        Ok(params) => {
            *target = Some(params);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "environment configuration rejected; keeping previous");
            Err(e)
        }
    }
}
