//! Authentication error model.

use thiserror::Error;

/// Result type used across the authentication core.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error.
///
/// These are **fatal** failures: misconfiguration, integrity faults, and
/// malformed credential input. A wrong username or wrong password is *not*
/// an error — strategies report that as `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token strategy was constructed without a signing secret.
    #[error("invalid secret key")]
    MissingSecretKey,

    /// The configured signing algorithm is not supported.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The user record is missing a field the configuration requires.
    #[error("invalid user data: missing field '{0}'")]
    InvalidUserData(String),

    /// The credential input lacks the username or password entry.
    ///
    /// This is the "bad request" specialization: it refers to the *shape*
    /// of the input, not to a wrong value.
    #[error("malformed credentials")]
    MalformedCredentials,

    /// A lifetime expression did not match the supported grammar.
    #[error("invalid lifetime expression: {0}")]
    InvalidLifetime(String),

    /// Signing the claim set failed.
    #[error("token encoding failed: {0}")]
    TokenEncoding(String),

    /// Decoding/verifying a token failed (bad signature, expired, malformed).
    ///
    /// `is_authenticated` never surfaces this; it is only returned by
    /// explicit decode calls.
    #[error("token verification failed: {0}")]
    TokenVerification(String),

    /// Applying the configured session name failed.
    #[error("failed to set session name: {0}")]
    SessionName(String),

    /// Applying the configured session lifetime failed.
    #[error("failed to set session lifetime: {0}")]
    SessionLifetime(String),

    /// Writing the session entry failed.
    #[error("session store: {0}")]
    SessionStore(String),

    /// Producing a password hash failed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl AuthError {
    pub fn invalid_user_data(field: impl Into<String>) -> Self {
        Self::InvalidUserData(field.into())
    }

    pub fn invalid_lifetime(expr: impl Into<String>) -> Self {
        Self::InvalidLifetime(expr.into())
    }

    pub fn session_store(msg: impl Into<String>) -> Self {
        Self::SessionStore(msg.into())
    }
}
