//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration resolution failures.
//!
//! Does NOT handle:
//! - Transport or refresh failures (see client crate `ClientError`).
//!
//! Invariants:
//! - All error variants include context for debugging (field or variable names).
//! - `InvalidEnumValue` carries the offending value; it is only produced for
//!   flag and enumeration variables, never for credentials.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur during configuration resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An explicitly supplied value is empty or malformed.
    #[error("Invalid argument {field}: {message}")]
    InvalidArgument { field: String, message: String },

    /// A required credential variable is absent or empty.
    #[error("Missing required environment variable: {0}")]
    MissingCredentials(String),

    /// A flag or enumeration variable holds an unrecognized literal.
    #[error("Invalid value for {var}: {value:?} (expected one of: {expected})")]
    InvalidEnumValue {
        var: String,
        value: String,
        expected: &'static str,
    },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    pub(crate) fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the environment variable or field this error refers to, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(field.as_str()),
            Self::MissingCredentials(var) | Self::InvalidEnumValue { var, .. } => Some(var.as_str()),
            Self::DotenvParse { .. } | Self::DotenvIo { .. } | Self::DotenvUnknown => None,
        }
    }
}

impl From<dotenvy::Error> for ConfigError {
    fn from(error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown,
        }
    }
}
