//! Integration tests for configuration loading through the public API.
//!
//! These tests verify end-to-end resolution using only what the crate
//! exports, the way the client crate consumes it.

use openapi_config::constants::{DEFAULT_HTTP_URL, DEFAULT_QUOTE_WS_URL, DEFAULT_TRADE_WS_URL};
use openapi_config::{
    ConfigError, ConfigLoader, Field, Language, PushCandlestickMode, Source, ValidatedParams,
    env_var_or_none, load_env_into,
};
use secrecy::{ExposeSecret, SecretString};
use serial_test::serial;

const ALL_VARS: [&str; 12] = [
    "APP_KEY",
    "APP_SECRET",
    "ACCESS_TOKEN",
    "HTTP_URL",
    "QUOTE_WS_URL",
    "TRADE_WS_URL",
    "LANGUAGE",
    "ENABLE_OVERNIGHT",
    "PUSH_CANDLESTICK_MODE",
    "PRINT_QUOTE_PACKAGES",
    "LOG_PATH",
    "DOTENV_DISABLED",
];

fn env_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
    ALL_VARS
        .iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| *v)
                .or((*name == "DOTENV_DISABLED").then_some("1"));
            (*name, value)
        })
        .collect()
}

/// Builder values take precedence over everything else.
#[test]
fn test_explicit_construction() {
    let params = ConfigLoader::from_credentials("key", "secret", "token")
        .with_language(Language::ZhCn)
        .build()
        .expect("should build with explicit credentials");

    assert_eq!(params.credentials().app_key(), "key");
    assert_eq!(params.flags().language, Language::ZhCn);
    assert_eq!(params.endpoints().http_url(), DEFAULT_HTTP_URL);
    assert_eq!(params.endpoints().quote_ws_url(), DEFAULT_QUOTE_WS_URL);
    assert_eq!(params.endpoints().trade_ws_url(), DEFAULT_TRADE_WS_URL);
}

/// `env_var_or_none` trims values and treats empty or unset variables as absent.
#[test]
#[serial]
fn test_env_var_or_none_exported() {
    temp_env::with_vars(
        [
            ("OPENAPI_EXPORT_CHECK", Some("  value ")),
            ("OPENAPI_EXPORT_BLANK", Some("   ")),
            ("OPENAPI_EXPORT_UNSET", None),
        ],
        || {
            assert_eq!(env_var_or_none("OPENAPI_EXPORT_CHECK"), Some("value".to_string()));
            assert_eq!(env_var_or_none("OPENAPI_EXPORT_BLANK"), None);
            assert_eq!(env_var_or_none("OPENAPI_EXPORT_UNSET"), None);
        },
    );
}

#[test]
#[serial]
fn test_from_env_end_to_end() {
    let vars = env_with(&[
        ("APP_KEY", "a"),
        ("APP_SECRET", "b"),
        ("ACCESS_TOKEN", "c"),
        ("PUSH_CANDLESTICK_MODE", "Confirmed"),
    ]);
    temp_env::with_vars(vars, || {
        let params = ValidatedParams::from_env().expect("environment is complete");
        assert_eq!(
            params.flags().push_candlestick_mode,
            PushCandlestickMode::Confirmed
        );
        assert!(params.flags().print_quote_packages);
        assert_eq!(params.source(Field::AppKey), Source::Environment);
    });
}

#[test]
#[serial]
fn test_load_env_into_keeps_previous_on_error() {
    let mut current = Some(
        ConfigLoader::from_credentials("kept", "kept", "kept")
            .build()
            .unwrap(),
    );

    temp_env::with_vars(env_with(&[("APP_KEY", "a"), ("APP_SECRET", "b")]), || {
        let err = load_env_into(&mut current).unwrap_err();
        assert_eq!(err, ConfigError::MissingCredentials("ACCESS_TOKEN".into()));
        assert_eq!(err.subject(), Some("ACCESS_TOKEN"));
    });

    assert_eq!(current.unwrap().credentials().app_key(), "kept");
}

#[test]
fn test_token_replacement_keeps_everything_else() {
    let params = ConfigLoader::from_credentials("key", "secret", "old")
        .with_enable_overnight(true)
        .build()
        .unwrap();

    let replaced = params
        .with_access_token(SecretString::from("new"))
        .expect("non-empty token is accepted");
    assert_eq!(replaced.credentials().access_token().expose_secret(), "new");
    assert_eq!(replaced.credentials().app_key(), "key");
    assert!(replaced.flags().enable_overnight);

    let rejected = replaced
        .with_access_token(SecretString::from(""))
        .expect_err("empty token is rejected");
    assert_eq!(rejected.credentials().access_token().expose_secret(), "new");
}

#[test]
fn test_error_display_never_contains_credentials() {
    let err = ConfigLoader::new()
        .with_app_key("visible-key")
        .with_app_secret("hidden-secret")
        .build()
        .unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("access_token"));
    assert!(!rendered.contains("hidden-secret"));
}
