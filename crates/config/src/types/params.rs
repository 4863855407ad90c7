//! The validated parameter set and its parts.
//!
//! Responsibilities:
//! - Define `EndpointSet`, `BehaviorFlags` and the combined `ValidatedParams`.
//! - Record which source (explicit, environment, `.env` file, default)
//!   produced each field.
//!
//! Does NOT handle:
//! - Resolution or validation of raw inputs (see `loader` module).
//! - Ownership of transport resources (see client crate `ConfigHandle`).
//!
//! Invariants:
//! - Every field of a `ValidatedParams` holds a concrete value; only the log
//!   path is optional, where absence means "no file logging".
//! - Endpoint URLs are non-empty and validated; `EndpointSet` fields are
//!   therefore private.
//! - `ValidatedParams` is not `Clone`: it carries credentials.

use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::credentials::CredentialSet;
use super::locale::{Language, PushCandlestickMode};
use crate::constants::{
    DEFAULT_ENABLE_OVERNIGHT, DEFAULT_HTTP_URL, DEFAULT_PRINT_QUOTE_PACKAGES,
    DEFAULT_QUOTE_WS_URL, DEFAULT_TRADE_WS_URL, ENV_ACCESS_TOKEN, ENV_APP_KEY, ENV_APP_SECRET,
    ENV_ENABLE_OVERNIGHT, ENV_HTTP_URL, ENV_LANGUAGE, ENV_LOG_PATH, ENV_PRINT_QUOTE_PACKAGES,
    ENV_PUSH_CANDLESTICK_MODE, ENV_QUOTE_WS_URL, ENV_TRADE_WS_URL,
};

/// Endpoint URLs for the HTTP API and the two websocket streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    http_url: String,
    quote_ws_url: String,
    trade_ws_url: String,
}

impl EndpointSet {
    pub(crate) fn new(http_url: String, quote_ws_url: String, trade_ws_url: String) -> Self {
        Self {
            http_url,
            quote_ws_url,
            trade_ws_url,
        }
    }

    pub fn http_url(&self) -> &str {
        &self.http_url
    }

    pub fn quote_ws_url(&self) -> &str {
        &self.quote_ws_url
    }

    pub fn trade_ws_url(&self) -> &str {
        &self.trade_ws_url
    }
}

impl Default for EndpointSet {
    fn default() -> Self {
        Self {
            http_url: DEFAULT_HTTP_URL.to_string(),
            quote_ws_url: DEFAULT_QUOTE_WS_URL.to_string(),
            trade_ws_url: DEFAULT_TRADE_WS_URL.to_string(),
        }
    }
}

/// Locale and behavior switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorFlags {
    pub language: Language,
    /// Subscribe to overnight quotes.
    pub enable_overnight: bool,
    pub push_candlestick_mode: PushCandlestickMode,
    /// Print the available quote packages once the quote stream connects.
    pub print_quote_packages: bool,
    /// Directory for log files. `None` disables file logging.
    pub log_path: Option<PathBuf>,
}

impl BehaviorFlags {
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }
}

impl Default for BehaviorFlags {
    fn default() -> Self {
        Self {
            language: Language::default(),
            enable_overnight: DEFAULT_ENABLE_OVERNIGHT,
            push_candlestick_mode: PushCandlestickMode::default(),
            print_quote_packages: DEFAULT_PRINT_QUOTE_PACKAGES,
            log_path: None,
        }
    }
}

/// Every configurable field, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    AppKey,
    AppSecret,
    AccessToken,
    HttpUrl,
    QuoteWsUrl,
    TradeWsUrl,
    Language,
    EnableOvernight,
    PushCandlestickMode,
    PrintQuotePackages,
    LogPath,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::AppKey,
        Field::AppSecret,
        Field::AccessToken,
        Field::HttpUrl,
        Field::QuoteWsUrl,
        Field::TradeWsUrl,
        Field::Language,
        Field::EnableOvernight,
        Field::PushCandlestickMode,
        Field::PrintQuotePackages,
        Field::LogPath,
    ];

    /// Environment variable name, without any prefix.
    pub const fn env_var(&self) -> &'static str {
        match self {
            Self::AppKey => ENV_APP_KEY,
            Self::AppSecret => ENV_APP_SECRET,
            Self::AccessToken => ENV_ACCESS_TOKEN,
            Self::HttpUrl => ENV_HTTP_URL,
            Self::QuoteWsUrl => ENV_QUOTE_WS_URL,
            Self::TradeWsUrl => ENV_TRADE_WS_URL,
            Self::Language => ENV_LANGUAGE,
            Self::EnableOvernight => ENV_ENABLE_OVERNIGHT,
            Self::PushCandlestickMode => ENV_PUSH_CANDLESTICK_MODE,
            Self::PrintQuotePackages => ENV_PRINT_QUOTE_PACKAGES,
            Self::LogPath => ENV_LOG_PATH,
        }
    }

    /// Name used in argument errors for explicitly supplied values.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppKey => "app_key",
            Self::AppSecret => "app_secret",
            Self::AccessToken => "access_token",
            Self::HttpUrl => "http_url",
            Self::QuoteWsUrl => "quote_ws_url",
            Self::TradeWsUrl => "trade_ws_url",
            Self::Language => "language",
            Self::EnableOvernight => "enable_overnight",
            Self::PushCandlestickMode => "push_candlestick_mode",
            Self::PrintQuotePackages => "print_quote_packages",
            Self::LogPath => "log_path",
        }
    }

    pub const fn is_credential(&self) -> bool {
        matches!(self, Self::AppKey | Self::AppSecret | Self::AccessToken)
    }
}

/// Where a resolved value came from.
///
/// Ordered from highest to lowest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    /// Supplied through a builder method.
    Explicit,
    /// Read from the process environment.
    Environment,
    /// Read from a `.env` file; never overrides the process environment.
    DotenvFile,
    /// Fixed default constant.
    Default,
}

/// Fully resolved configuration: credentials, endpoints and flags.
#[derive(Debug)]
pub struct ValidatedParams {
    credentials: CredentialSet,
    endpoints: EndpointSet,
    flags: BehaviorFlags,
    sources: BTreeMap<Field, Source>,
}

impl ValidatedParams {
    pub(crate) fn new(
        credentials: CredentialSet,
        endpoints: EndpointSet,
        flags: BehaviorFlags,
        sources: BTreeMap<Field, Source>,
    ) -> Self {
        Self {
            credentials,
            endpoints,
            flags,
            sources,
        }
    }

    pub fn credentials(&self) -> &CredentialSet {
        &self.credentials
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    pub fn flags(&self) -> &BehaviorFlags {
        &self.flags
    }

    /// Which source produced `field`.
    pub fn source(&self, field: Field) -> Source {
        self.sources.get(&field).copied().unwrap_or(Source::Default)
    }

    /// Adopt a rotated access token, consuming the old parameter set.
    ///
    /// A blank `token` is rejected and the original set is handed back
    /// unchanged in the `Err` variant.
    pub fn with_access_token(self, token: SecretString) -> Result<Self, Self> {
        if token.expose_secret().trim().is_empty() {
            return Err(self);
        }
        let Self {
            credentials,
            endpoints,
            flags,
            mut sources,
        } = self;
        sources.insert(Field::AccessToken, Source::Explicit);
        Ok(Self {
            credentials: credentials.with_access_token(token),
            endpoints,
            flags,
            sources,
        })
    }
}
