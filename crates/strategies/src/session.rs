//! Session-based authentication strategy.

use std::sync::Arc;

use chrono::DateTime;
use tracing::{debug, warn};

use palisade_core::{
    Argon2Verifier, AuthError, AuthResult, Clock, Credentials, PasswordVerifier, StrategyConfig,
    SystemClock, UserRecord,
};

use crate::store::SessionStore;
use crate::strategy::{AuthStrategy, verify_credentials};

/// Fixed logical key of the session entry.
pub const SESSION_USER_KEY: &str = "user";

/// Authentication backed by an external keyed session store.
///
/// On successful [`authenticate`](AuthStrategy::authenticate) a sanitized
/// copy of the user record (password field removed) is written under the
/// fixed key [`SESSION_USER_KEY`]; `is_authenticated`/`user` consult that
/// entry and `logout` destroys the entire session context.
pub struct SessionAuthStrategy<S: SessionStore> {
    user_data: UserRecord,
    config: StrategyConfig,
    store: Arc<S>,
    clock: Arc<dyn Clock + Send + Sync>,
    verifier: Arc<dyn PasswordVerifier + Send + Sync>,
}

impl<S: SessionStore> SessionAuthStrategy<S> {
    pub fn new(user: UserRecord, config: StrategyConfig, store: Arc<S>) -> Self {
        Self {
            user_data: user,
            config,
            store,
            clock: Arc::new(SystemClock),
            verifier: Arc::new(Argon2Verifier),
        }
    }

    /// Replace the clock (deterministic expiry in tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the password verification primitive.
    pub fn with_verifier(mut self, verifier: Arc<dyn PasswordVerifier + Send + Sync>) -> Self {
        self.verifier = verifier;
        self
    }
}

impl<S: SessionStore> AuthStrategy for SessionAuthStrategy<S> {
    fn authenticate(&mut self, credentials: &Credentials) -> AuthResult<bool> {
        if !verify_credentials(
            &self.user_data,
            &self.config,
            credentials,
            self.verifier.as_ref(),
        )? {
            return Ok(false);
        }

        let sanitized = self.user_data.sanitized(&self.config.password_field);
        self.store
            .put(SESSION_USER_KEY, sanitized)
            .map_err(|e| AuthError::session_store(e.to_string()))?;

        if let Some(name) = &self.config.session_name {
            self.store
                .set_name(name)
                .map_err(|e| AuthError::SessionName(e.to_string()))?;
        }

        if let Some(lifetime) = self.config.session_lifetime {
            let expiry = lifetime.resolve(self.clock.now());
            let expires_at = DateTime::from_timestamp(expiry, 0)
                .ok_or_else(|| AuthError::SessionLifetime(format!("expiry out of range: {expiry}")))?;
            self.store
                .set_expiry(expires_at)
                .map_err(|e| AuthError::SessionLifetime(e.to_string()))?;
        }

        debug!("session entry written");
        Ok(true)
    }

    fn is_authenticated(&mut self) -> bool {
        self.store.contains(SESSION_USER_KEY)
    }

    fn user(&self) -> Option<UserRecord> {
        self.store.get(SESSION_USER_KEY)
    }

    fn logout(&mut self) {
        // Idempotent: a failure to destroy an already-gone context is not a
        // caller-visible fault.
        if let Err(err) = self.store.destroy() {
            warn!(error = %err, "failed to destroy session context");
        }
    }
}
