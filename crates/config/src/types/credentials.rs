//! Credential types for OpenAPI configuration.
//!
//! Responsibilities:
//! - Hold the app key, app secret and access token of a resolved configuration.
//!
//! Does NOT handle:
//! - Validation (performed by the loader before construction).
//! - Token rotation (the transport owns rotated tokens, see client crate).
//!
//! Invariants:
//! - The app secret and access token are `secrecy::SecretString` so `Debug`
//!   never prints them.
//! - All three values are non-empty once constructed.
//! - `CredentialSet` is deliberately not `Clone`.

use secrecy::SecretString;

/// Resolved, non-empty credentials.
#[derive(Debug)]
pub struct CredentialSet {
    app_key: String,
    app_secret: SecretString,
    access_token: SecretString,
}

impl CredentialSet {
    pub(crate) fn new(app_key: String, app_secret: SecretString, access_token: SecretString) -> Self {
        Self {
            app_key,
            app_secret,
            access_token,
        }
    }

    /// The application key. Not secret.
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn app_secret(&self) -> &SecretString {
        &self.app_secret
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Replace the access token. Callers check that `token` is non-empty.
    pub(crate) fn with_access_token(self, token: SecretString) -> Self {
        Self {
            access_token: token,
            ..self
        }
    }
}
