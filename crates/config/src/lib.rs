//! Configuration management for the OpenAPI SDK.
//!
//! This crate resolves credentials, endpoints and behavior flags from
//! explicit arguments or environment variables into a [`ValidatedParams`].

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none, load_env_into};
pub use types::{
    BehaviorFlags, CredentialSet, EndpointSet, Field, Language, PushCandlestickMode, Source,
    UnknownLiteral, ValidatedParams,
};
