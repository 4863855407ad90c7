//! Centralized constants for the OpenAPI SDK workspace.
//!
//! This module contains default endpoint values and the environment variable
//! names read by the loader, so that both crates agree on a single source.

// =============================================================================
// Endpoint Defaults
// =============================================================================

/// Default HTTP API endpoint.
pub const DEFAULT_HTTP_URL: &str = "https://openapi.longportapp.com";

/// Default quote websocket endpoint.
pub const DEFAULT_QUOTE_WS_URL: &str = "wss://openapi-quote.longportapp.com/v2";

/// Default trade websocket endpoint.
pub const DEFAULT_TRADE_WS_URL: &str = "wss://openapi-trade.longportapp.com/v2";

// =============================================================================
// Behavior Defaults
// =============================================================================

/// Overnight quotes are disabled unless requested.
pub const DEFAULT_ENABLE_OVERNIGHT: bool = false;

/// Quote packages are printed when the quote connection is established.
pub const DEFAULT_PRINT_QUOTE_PACKAGES: bool = true;

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_APP_KEY: &str = "APP_KEY";
pub const ENV_APP_SECRET: &str = "APP_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ENV_HTTP_URL: &str = "HTTP_URL";
pub const ENV_QUOTE_WS_URL: &str = "QUOTE_WS_URL";
pub const ENV_TRADE_WS_URL: &str = "TRADE_WS_URL";
pub const ENV_LANGUAGE: &str = "LANGUAGE";
pub const ENV_ENABLE_OVERNIGHT: &str = "ENABLE_OVERNIGHT";
pub const ENV_PUSH_CANDLESTICK_MODE: &str = "PUSH_CANDLESTICK_MODE";
pub const ENV_PRINT_QUOTE_PACKAGES: &str = "PRINT_QUOTE_PACKAGES";
pub const ENV_LOG_PATH: &str = "LOG_PATH";

/// Setting this to `1` or `true` skips `.env` file loading entirely.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
