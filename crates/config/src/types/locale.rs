//! Language and push-mode enumerations.
//!
//! Responsibilities:
//! - Define the closed set of language identifiers and candlestick push modes.
//! - Parse them from their literal forms (`zh-CN`, `realtime`, ...).
//!
//! Invariants:
//! - Parsing is case-insensitive; `Display` always emits the canonical literal.
//! - Serde representation matches the canonical literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language identifier sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Simplified Chinese.
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// Traditional Chinese (Hong Kong).
    #[serde(rename = "zh-HK")]
    ZhHk,
    /// English.
    #[default]
    #[serde(rename = "en")]
    En,
}

impl Language {
    /// Every accepted language, in canonical order.
    pub const ALL: [Language; 3] = [Language::ZhCn, Language::ZhHk, Language::En];

    /// Canonical literal for this language.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::ZhHk => "zh-HK",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLiteral(s.to_string()))
    }
}

/// How candlestick updates are pushed to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushCandlestickMode {
    /// Push every update of the in-progress candlestick.
    #[default]
    Realtime,
    /// Push only once a candlestick is confirmed (closed).
    Confirmed,
}

impl PushCandlestickMode {
    /// Canonical literal for this mode.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for PushCandlestickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PushCandlestickMode {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "realtime" => Ok(Self::Realtime),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(UnknownLiteral(s.to_string())),
        }
    }
}

/// A literal that does not name any variant of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value: {0}")]
pub struct UnknownLiteral(pub String);

/// Parse a boolean flag, accepting `true`/`false` in any case.
pub(crate) fn parse_flag(raw: &str) -> Result<bool, UnknownLiteral> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(UnknownLiteral(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parses_case_insensitively() {
        assert_eq!("zh-CN".parse::<Language>().unwrap(), Language::ZhCn);
        assert_eq!("ZH-hk".parse::<Language>().unwrap(), Language::ZhHk);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn test_language_rejects_unknown_literal() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert_eq!(err, UnknownLiteral("fr".to_string()));
        assert!("zh_CN".parse::<Language>().is_err());
    }

    #[test]
    fn test_push_candlestick_mode_parse() {
        assert_eq!(
            "Confirmed".parse::<PushCandlestickMode>().unwrap(),
            PushCandlestickMode::Confirmed
        );
        assert!("weekly".parse::<PushCandlestickMode>().is_err());
    }

    #[test]
    fn test_display_matches_serde_literal() {
        for lang in Language::ALL {
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang));
        }
        let json = serde_json::to_string(&PushCandlestickMode::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Ok(true));
        assert_eq!(parse_flag("False"), Ok(false));
        assert!(parse_flag("yes").is_err());
        assert!(parse_flag("1").is_err());
    }
}
