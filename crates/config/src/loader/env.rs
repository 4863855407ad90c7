//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse environment variables for OpenAPI configuration.
//! - Read `.env` files into a private map without touching the process environment.
//! - Apply the layered lookup (process env, then `.env`, then nothing) to a
//!   ConfigLoader instance.
//!
//! Does NOT handle:
//! - Default values (applied by `ConfigLoader::build`).
//! - Building the final ValidatedParams (see builder.rs).
//!
//! Invariants:
//! - Process environment variables take precedence over `.env` values.
//! - Empty or whitespace-only values are treated as unset in both layers.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid flag or enum values return ConfigError::InvalidEnumValue.
//! - Credential values are never logged.

use secrecy::SecretString;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::{Field, Source, parse_flag};

const DOTENV_FILE_NAME: &str = ".env";
const FLAG_LITERALS: &str = "true, false";
const LANGUAGE_LITERALS: &str = "zh-CN, zh-HK, en";
const PUSH_CANDLESTICK_MODE_LITERALS: &str = "realtime, confirmed";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| non_blank(&s))
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Look up `name` in the process environment, falling back to `.env` values.
fn layered_lookup(name: &str, dotenv: &HashMap<String, String>) -> Option<(String, Source)> {
    if let Some(value) = env_var_or_none(name) {
        return Some((value, Source::Environment));
    }
    dotenv
        .get(name)
        .and_then(|raw| non_blank(raw))
        .map(|value| (value, Source::DotenvFile))
}

/// Read a `.env` file into a map.
///
/// With `path == None` only `.env` in the current directory is read; parent
/// directories are never searched. A missing file yields an empty map.
pub(crate) fn read_dotenv(path: Option<&Path>) -> Result<HashMap<String, String>, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .map_err(|e| ConfigError::DotenvIo { kind: e.kind() })?
            .join(DOTENV_FILE_NAME),
    };

    let iter = match dotenvy::from_path_iter(&path) {
        Ok(iter) => iter,
        Err(e) if is_not_found(&e) => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };

    iter.map(|item| item.map_err(ConfigError::from)).collect()
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Apply environment variable configuration to the loader.
///
/// Fields set through builder methods are skipped. Every lookup is parsed
/// before any field is written, so a failure leaves the loader unchanged.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let found: Vec<(Field, String, String, Source)> = Field::ALL
        .into_iter()
        .filter(|field| !loader.is_explicit(*field))
        .filter_map(|field| {
            let var = format!("{}{}", loader.env_prefix(), field.env_var());
            layered_lookup(&var, loader.dotenv_values())
                .map(|(value, source)| (field, var, value, source))
        })
        .collect();

    let parsed = found
        .into_iter()
        .map(|(field, var, value, source)| {
            if !field.is_credential() {
                tracing::debug!(var = %var, ?source, "read configuration variable");
            }
            parse_value(field, &var, value).map(|value| (value, source))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (value, source) in parsed {
        match value {
            EnvValue::AppKey(v) => loader.set_app_key(v, source),
            EnvValue::AppSecret(v) => loader.set_app_secret(v, source),
            EnvValue::AccessToken(v) => loader.set_access_token(v, source),
            EnvValue::HttpUrl(v) => loader.set_http_url(v, source),
            EnvValue::QuoteWsUrl(v) => loader.set_quote_ws_url(v, source),
            EnvValue::TradeWsUrl(v) => loader.set_trade_ws_url(v, source),
            EnvValue::Language(v) => loader.set_language(v, source),
            EnvValue::EnableOvernight(v) => loader.set_enable_overnight(v, source),
            EnvValue::PushCandlestickMode(v) => loader.set_push_candlestick_mode(v, source),
            EnvValue::PrintQuotePackages(v) => loader.set_print_quote_packages(v, source),
            EnvValue::LogPath(v) => loader.set_log_path(v, source),
        }
    }

    Ok(())
}

/// A parsed environment value, tagged by the field it belongs to.
enum EnvValue {
    AppKey(String),
    AppSecret(SecretString),
    AccessToken(SecretString),
    HttpUrl(String),
    QuoteWsUrl(String),
    TradeWsUrl(String),
    Language(crate::types::Language),
    EnableOvernight(bool),
    PushCandlestickMode(crate::types::PushCandlestickMode),
    PrintQuotePackages(bool),
    LogPath(PathBuf),
}

fn parse_value(field: Field, var: &str, value: String) -> Result<EnvValue, ConfigError> {
    let invalid = |value: &str, expected: &'static str| ConfigError::InvalidEnumValue {
        var: var.to_string(),
        value: value.to_string(),
        expected,
    };

    Ok(match field {
        Field::AppKey => EnvValue::AppKey(value),
        Field::AppSecret => EnvValue::AppSecret(SecretString::new(value.into())),
        Field::AccessToken => EnvValue::AccessToken(SecretString::new(value.into())),
        Field::HttpUrl => EnvValue::HttpUrl(value),
        Field::QuoteWsUrl => EnvValue::QuoteWsUrl(value),
        Field::TradeWsUrl => EnvValue::TradeWsUrl(value),
        Field::Language => EnvValue::Language(
            value
                .parse()
                .map_err(|_| invalid(&value, LANGUAGE_LITERALS))?,
        ),
        Field::EnableOvernight => EnvValue::EnableOvernight(
            parse_flag(&value).map_err(|_| invalid(&value, FLAG_LITERALS))?,
        ),
        Field::PushCandlestickMode => EnvValue::PushCandlestickMode(
            value
                .parse()
                .map_err(|_| invalid(&value, PUSH_CANDLESTICK_MODE_LITERALS))?,
        ),
        Field::PrintQuotePackages => EnvValue::PrintQuotePackages(
            parse_flag(&value).map_err(|_| invalid(&value, FLAG_LITERALS))?,
        ),
        Field::LogPath => EnvValue::LogPath(PathBuf::from(value)),
    })
}
