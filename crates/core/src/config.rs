//! Strategy configuration.

use serde::Deserialize;

use crate::lifetime::Lifetime;

/// Default field name carrying the username value.
pub const DEFAULT_USERNAME_FIELD: &str = "email";
/// Default field name carrying the password hash.
pub const DEFAULT_PASSWORD_FIELD: &str = "password";
/// Default `iss` claim value.
pub const DEFAULT_ISSUER: &str = "assegaiphp";
/// Default signing algorithm identifier.
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Named options shared by both strategies.
///
/// Token-only options (`secret_key`, `algorithm`, `audience`, `issuer`,
/// `token_lifetime`, `token`) are ignored by the session strategy, and vice
/// versa for `session_name`/`session_lifetime`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Signing/verification key. Required by the token strategy; its
    /// constructor fails without one.
    pub secret_key: Option<String>,

    /// Signing algorithm identifier (`HS256`, `HS384`, `HS512`).
    pub algorithm: String,

    /// `aud` claim; omitted from tokens when `None`.
    pub audience: Option<String>,

    /// `iss` claim; omitted from tokens when empty.
    pub issuer: String,

    /// Name of the user/credential field carrying the username value.
    pub username_field: String,

    /// Name of the user/credential field carrying the password hash.
    pub password_field: String,

    /// Token expiry; one hour when unset.
    pub token_lifetime: Option<Lifetime>,

    /// Session expiry; only applied when set.
    pub session_lifetime: Option<Lifetime>,

    /// Session/cookie identifier override.
    pub session_name: Option<String>,

    /// A pre-supplied token, e.g. carried over from an earlier exchange.
    pub token: Option<String>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            algorithm: DEFAULT_ALGORITHM.to_string(),
            audience: None,
            issuer: DEFAULT_ISSUER.to_string(),
            username_field: DEFAULT_USERNAME_FIELD.to_string(),
            password_field: DEFAULT_PASSWORD_FIELD.to_string(),
            token_lifetime: None,
            session_lifetime: None,
            session_name: None,
            token: None,
        }
    }
}

impl StrategyConfig {
    /// A config with the given signing secret and every other option at its
    /// default.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret.into()),
            ..Self::default()
        }
    }
}
