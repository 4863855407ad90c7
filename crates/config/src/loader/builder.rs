//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that resolves a `ValidatedParams`.
//! - Support explicit values (builder methods), environment variables and a
//!   `.env` file, filling anything left unset from fixed defaults.
//! - Track which source produced each field.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Owning transport resources (see client crate).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables, regardless
//!   of call order.
//! - Process environment takes precedence over `.env` file values; the
//!   process environment is never mutated.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before the `.env` file is read.
//! - Without `load_dotenv()`/`from_env()`, `build()` is pure: no I/O and no
//!   environment access.

use secrecy::{ExposeSecret, SecretString};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use super::env::{apply_env, read_dotenv};
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_ENABLE_OVERNIGHT, DEFAULT_HTTP_URL, DEFAULT_PRINT_QUOTE_PACKAGES,
    DEFAULT_QUOTE_WS_URL, DEFAULT_TRADE_WS_URL, ENV_DOTENV_DISABLED,
};
use crate::types::{
    BehaviorFlags, CredentialSet, EndpointSet, Field, Language, PushCandlestickMode, Source,
    ValidatedParams,
};

/// A value together with the source that supplied it.
#[derive(Debug)]
struct Sourced<T> {
    value: T,
    source: Source,
}

impl<T> Sourced<T> {
    fn explicit(value: T) -> Option<Self> {
        Some(Self {
            value,
            source: Source::Explicit,
        })
    }
}

/// Configuration loader that builds `ValidatedParams` from explicit values,
/// environment variables and an optional `.env` file.
///
/// Not `Debug`: it holds raw `.env` values, which may include secrets.
#[derive(Default)]
pub struct ConfigLoader {
    app_key: Option<Sourced<String>>,
    app_secret: Option<Sourced<SecretString>>,
    access_token: Option<Sourced<SecretString>>,
    http_url: Option<Sourced<String>>,
    quote_ws_url: Option<Sourced<String>>,
    trade_ws_url: Option<Sourced<String>>,
    language: Option<Sourced<Language>>,
    enable_overnight: Option<Sourced<bool>>,
    push_candlestick_mode: Option<Sourced<PushCandlestickMode>>,
    print_quote_packages: Option<Sourced<bool>>,
    log_path: Option<Sourced<PathBuf>>,
    env_prefix: String,
    dotenv_path: Option<PathBuf>,
    dotenv_values: HashMap<String, String>,
    env_consulted: bool,
}

impl ConfigLoader {
    /// Create a new, empty configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader seeded with the three required credentials.
    pub fn from_credentials(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self::new()
            .with_app_key(app_key)
            .with_app_secret(app_secret)
            .with_access_token(access_token)
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Read variables from a `.env` file if present.
    ///
    /// Values are kept inside the loader and consulted by `from_env()` only
    /// for variables that are not set in the process environment.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be read (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(mut self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        self.dotenv_values = read_dotenv(self.dotenv_path.as_deref())?;
        tracing::debug!(
            count = self.dotenv_values.len(),
            "loaded variables from .env file"
        );
        Ok(self)
    }

    /// Read the `.env` file from `path` instead of `.env` in the
    /// current directory.
    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Prefix prepended to every variable name (e.g. `LONGPORT_` turns
    /// `APP_KEY` into `LONGPORT_APP_KEY`).
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read configuration from environment variables.
    ///
    /// Fields already set through builder methods are left alone.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        self.env_consulted = true;
        Ok(self)
    }

    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Sourced::explicit(app_key.into());
        self
    }

    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Sourced::explicit(SecretString::new(app_secret.into().into()));
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Sourced::explicit(SecretString::new(access_token.into().into()));
        self
    }

    /// Set the HTTP endpoint URL.
    pub fn with_http_url(mut self, url: impl Into<String>) -> Self {
        self.http_url = Sourced::explicit(url.into());
        self
    }

    /// Set the quote websocket endpoint URL.
    pub fn with_quote_ws_url(mut self, url: impl Into<String>) -> Self {
        self.quote_ws_url = Sourced::explicit(url.into());
        self
    }

    /// Set the trade websocket endpoint URL.
    pub fn with_trade_ws_url(mut self, url: impl Into<String>) -> Self {
        self.trade_ws_url = Sourced::explicit(url.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Sourced::explicit(language);
        self
    }

    pub fn with_enable_overnight(mut self, enable: bool) -> Self {
        self.enable_overnight = Sourced::explicit(enable);
        self
    }

    pub fn with_push_candlestick_mode(mut self, mode: PushCandlestickMode) -> Self {
        self.push_candlestick_mode = Sourced::explicit(mode);
        self
    }

    pub fn with_print_quote_packages(mut self, print: bool) -> Self {
        self.print_quote_packages = Sourced::explicit(print);
        self
    }

    /// Enable file logging under `path`.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Sourced::explicit(path.into());
        self
    }

    /// Build the final parameter set.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if an explicit credential, URL or log path is
    ///   empty or malformed, or a credential was never supplied and the
    ///   environment was not consulted.
    /// - `MissingCredentials` if a credential is missing after `from_env()`.
    pub fn build(self) -> Result<ValidatedParams, ConfigError> {
        let env_prefix = self.env_prefix;
        let env_consulted = self.env_consulted;
        let missing = |field: Field| {
            if env_consulted {
                ConfigError::MissingCredentials(format!("{}{}", env_prefix, field.env_var()))
            } else {
                ConfigError::invalid_argument(field.name(), "is required")
            }
        };

        let app_key = self.app_key.ok_or_else(|| missing(Field::AppKey))?;
        let app_secret = self.app_secret.ok_or_else(|| missing(Field::AppSecret))?;
        let access_token = self.access_token.ok_or_else(|| missing(Field::AccessToken))?;

        require_non_empty(Field::AppKey, &app_key.value)?;
        require_non_empty(Field::AppSecret, app_secret.value.expose_secret())?;
        require_non_empty(Field::AccessToken, access_token.value.expose_secret())?;

        let mut sources = BTreeMap::new();
        let mut record = |field: Field, source: Option<Source>| {
            sources.insert(field, source.unwrap_or(Source::Default));
        };

        record(Field::AppKey, Some(app_key.source));
        record(Field::AppSecret, Some(app_secret.source));
        record(Field::AccessToken, Some(access_token.source));

        let http_url =
            resolve_endpoint(Field::HttpUrl, self.http_url, DEFAULT_HTTP_URL, HTTP_SCHEMES)?;
        record(Field::HttpUrl, http_url.1);
        let quote_ws_url = resolve_endpoint(
            Field::QuoteWsUrl,
            self.quote_ws_url,
            DEFAULT_QUOTE_WS_URL,
            WS_SCHEMES,
        )?;
        record(Field::QuoteWsUrl, quote_ws_url.1);
        let trade_ws_url = resolve_endpoint(
            Field::TradeWsUrl,
            self.trade_ws_url,
            DEFAULT_TRADE_WS_URL,
            WS_SCHEMES,
        )?;
        record(Field::TradeWsUrl, trade_ws_url.1);

        if let Some(path) = &self.log_path
            && path.value.as_os_str().is_empty()
        {
            return Err(ConfigError::invalid_argument(
                Field::LogPath.name(),
                "must not be empty",
            ));
        }

        record(Field::Language, self.language.as_ref().map(|s| s.source));
        record(
            Field::EnableOvernight,
            self.enable_overnight.as_ref().map(|s| s.source),
        );
        record(
            Field::PushCandlestickMode,
            self.push_candlestick_mode.as_ref().map(|s| s.source),
        );
        record(
            Field::PrintQuotePackages,
            self.print_quote_packages.as_ref().map(|s| s.source),
        );
        record(Field::LogPath, self.log_path.as_ref().map(|s| s.source));

        let flags = BehaviorFlags {
            language: self.language.map(|s| s.value).unwrap_or_default(),
            enable_overnight: self
                .enable_overnight
                .map(|s| s.value)
                .unwrap_or(DEFAULT_ENABLE_OVERNIGHT),
            push_candlestick_mode: self
                .push_candlestick_mode
                .map(|s| s.value)
                .unwrap_or_default(),
            print_quote_packages: self
                .print_quote_packages
                .map(|s| s.value)
                .unwrap_or(DEFAULT_PRINT_QUOTE_PACKAGES),
            log_path: self.log_path.map(|s| s.value),
        };
        let endpoints = EndpointSet::new(http_url.0, quote_ws_url.0, trade_ws_url.0);

        tracing::debug!(
            app_key = %app_key.value,
            http_url = %endpoints.http_url(),
            language = %flags.language,
            enable_overnight = flags.enable_overnight,
            "resolved client configuration"
        );

        Ok(ValidatedParams::new(
            CredentialSet::new(app_key.value, app_secret.value, access_token.value),
            endpoints,
            flags,
            sources,
        ))
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    pub(crate) fn dotenv_values(&self) -> &HashMap<String, String> {
        &self.dotenv_values
    }

    /// Whether `field` was set through a builder method.
    pub(crate) fn is_explicit(&self, field: Field) -> bool {
        fn explicit<T>(slot: &Option<Sourced<T>>) -> bool {
            matches!(slot, Some(Sourced { source: Source::Explicit, .. }))
        }
        match field {
            Field::AppKey => explicit(&self.app_key),
            Field::AppSecret => explicit(&self.app_secret),
            Field::AccessToken => explicit(&self.access_token),
            Field::HttpUrl => explicit(&self.http_url),
            Field::QuoteWsUrl => explicit(&self.quote_ws_url),
            Field::TradeWsUrl => explicit(&self.trade_ws_url),
            Field::Language => explicit(&self.language),
            Field::EnableOvernight => explicit(&self.enable_overnight),
            Field::PushCandlestickMode => explicit(&self.push_candlestick_mode),
            Field::PrintQuotePackages => explicit(&self.print_quote_packages),
            Field::LogPath => explicit(&self.log_path),
        }
    }

    pub(crate) fn set_app_key(&mut self, value: String, source: Source) {
        self.app_key = Some(Sourced { value, source });
    }

    pub(crate) fn set_app_secret(&mut self, value: SecretString, source: Source) {
        self.app_secret = Some(Sourced { value, source });
    }

    pub(crate) fn set_access_token(&mut self, value: SecretString, source: Source) {
        self.access_token = Some(Sourced { value, source });
    }

    pub(crate) fn set_http_url(&mut self, value: String, source: Source) {
        self.http_url = Some(Sourced { value, source });
    }

    pub(crate) fn set_quote_ws_url(&mut self, value: String, source: Source) {
        self.quote_ws_url = Some(Sourced { value, source });
    }

    pub(crate) fn set_trade_ws_url(&mut self, value: String, source: Source) {
        self.trade_ws_url = Some(Sourced { value, source });
    }

    pub(crate) fn set_language(&mut self, value: Language, source: Source) {
        self.language = Some(Sourced { value, source });
    }

    pub(crate) fn set_enable_overnight(&mut self, value: bool, source: Source) {
        self.enable_overnight = Some(Sourced { value, source });
    }

    pub(crate) fn set_push_candlestick_mode(&mut self, value: PushCandlestickMode, source: Source) {
        self.push_candlestick_mode = Some(Sourced { value, source });
    }

    pub(crate) fn set_print_quote_packages(&mut self, value: bool, source: Source) {
        self.print_quote_packages = Some(Sourced { value, source });
    }

    pub(crate) fn set_log_path(&mut self, value: PathBuf, source: Source) {
        self.log_path = Some(Sourced { value, source });
    }
}

const HTTP_SCHEMES: &[&str] = &["http", "https"];
const WS_SCHEMES: &[&str] = &["ws", "wss"];

fn require_non_empty(field: Field, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid_argument(field.name(), "must not be empty"));
    }
    Ok(())
}

/// Resolve an endpoint slot to a concrete URL, returning the source used
/// (`None` when the default was taken).
fn resolve_endpoint(
    field: Field,
    slot: Option<Sourced<String>>,
    default: &str,
    schemes: &[&str],
) -> Result<(String, Option<Source>), ConfigError> {
    match slot {
        Some(Sourced { value, source }) => {
            let label = match source {
                Source::Explicit => field.name(),
                _ => field.env_var(),
            };
            let url = validate_and_normalize_url(&value, label, schemes)?;
            Ok((url, Some(source)))
        }
        None => Ok((default.to_string(), None)),
    }
}

/// Validates and normalizes an endpoint URL.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Blank/whitespace-only is rejected
/// - Parse as an absolute URL
/// - Require the scheme is one of `schemes`
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_url(
    raw: &str,
    label: &str,
    schemes: &[&str],
) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::invalid_argument(label, "must not be empty"));
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| {
        ConfigError::invalid_argument(label, format!("must be an absolute URL with a host: {e}"))
    })?;

    let scheme = parsed.scheme();
    if !schemes.contains(&scheme) {
        return Err(ConfigError::invalid_argument(
            label,
            format!("scheme must be one of {}, got: {scheme}", schemes.join("/")),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::invalid_argument(label, "host is required"));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
