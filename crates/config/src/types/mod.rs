//! Configuration type definitions for the OpenAPI SDK.
//!
//! Responsibilities:
//! - Define credential, endpoint, locale and behavior types.
//! - Define the combined `ValidatedParams` handed to the transport layer.
//!
//! Does NOT handle:
//! - Configuration loading from the environment or `.env` files (see `loader` module).
//! - Ownership of transport resources or token refresh (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Types that carry credentials are not `Clone`.

mod credentials;
mod locale;
mod params;

pub(crate) use locale::parse_flag;
pub use credentials::CredentialSet;
pub use locale::{Language, PushCandlestickMode, UnknownLiteral};
pub use params::{BehaviorFlags, EndpointSet, Field, Source, ValidatedParams};
