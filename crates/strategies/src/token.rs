//! Token-based authentication strategy.

use std::collections::BTreeMap;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value as JsonValue;
use tracing::debug;

use palisade_core::{
    Argon2Verifier, AuthError, AuthResult, Clock, Credentials, Lifetime, PasswordVerifier,
    StrategyConfig, SystemClock, UserRecord,
};

use crate::claims::TokenClaims;
use crate::strategy::{AuthStrategy, verify_credentials};

/// The literal prefix stripped from inbound `Authorization` header values.
const BEARER_PREFIX: &str = "Bearer ";

/// Authentication via signed, claims-bearing tokens (compact JWS).
///
/// On successful [`authenticate`](AuthStrategy::authenticate) the strategy
/// mints a token over the claim set and holds the decoded claims as the
/// current user. Verification is stateless: the artifact is self-contained,
/// so independent instances can verify concurrently with no shared state.
///
/// # Known limitation
///
/// Tokens are not revocable. [`logout`](AuthStrategy::logout) clears the
/// locally held token and claims, but a copy of a non-expired token
/// presented later (e.g. via [`accept_bearer`](Self::accept_bearer)) still
/// verifies — expiry is the only invalidation mechanism.
pub struct TokenAuthStrategy {
    user_data: UserRecord,
    config: StrategyConfig,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token minted by `authenticate` (or pre-supplied via config).
    token: Option<String>,
    /// Inbound candidate handed over by the boundary layer.
    bearer: Option<String>,
    current: Option<TokenClaims>,
    clock: Arc<dyn Clock + Send + Sync>,
    verifier: Arc<dyn PasswordVerifier + Send + Sync>,
}

impl std::fmt::Debug for TokenAuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthStrategy")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenAuthStrategy {
    /// Build a strategy over an already-loaded user record.
    ///
    /// Fails with [`AuthError::MissingSecretKey`] when the config carries no
    /// signing secret, and [`AuthError::UnsupportedAlgorithm`] for anything
    /// outside the HMAC family.
    pub fn new(user: UserRecord, config: StrategyConfig) -> AuthResult<Self> {
        let secret = config
            .secret_key
            .as_deref()
            .ok_or(AuthError::MissingSecretKey)?;

        let algorithm = match config.algorithm.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => return Err(AuthError::UnsupportedAlgorithm(other.to_string())),
        };

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let token = config.token.clone();

        Ok(Self {
            user_data: user,
            config,
            algorithm,
            encoding_key,
            decoding_key,
            token,
            bearer: None,
            current: None,
            clock: Arc::new(SystemClock),
            verifier: Arc::new(Argon2Verifier),
        })
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

    /// Hand over an inbound `Authorization` header value.
    ///
    /// Strips exactly the literal `"Bearer "` prefix and keeps the remainder
    /// as the candidate token for [`is_authenticated`](AuthStrategy::is_authenticated).
    /// A value without the prefix is kept verbatim.
    pub fn accept_bearer(&mut self, header_value: &str) {
        let candidate = header_value
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(header_value);
        self.bearer = Some(candidate.to_string());
    }

    /// The token minted by the last successful `authenticate`, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The currently held decoded claim set, if any.
    pub fn claims(&self) -> Option<&TokenClaims> {
        self.current.as_ref()
    }

    /// Decode and verify the held (or bearer-supplied) token, propagating
    /// verification errors — unlike `is_authenticated`, which swallows them.
    pub fn decode(&self) -> AuthResult<TokenClaims> {
        let candidate = self
            .token
            .as_deref()
            .or(self.bearer.as_deref())
            .ok_or_else(|| AuthError::TokenVerification("no token held".to_string()))?;
        self.decode_token(candidate)
    }

    fn decode_token(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        // Signature + expiry only; audience/issuer are carried as claims but
        // not enforced on decode.
        validation.validate_aud = false;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenVerification(e.to_string()))
    }

    fn build_claims(&self, expected_username: &str, exp: i64) -> TokenClaims {
        let now = self.clock.now();

        let mut claims = TokenClaims {
            sub: self
                .user_data
                .id
                .clone()
                .unwrap_or_else(|| expected_username.to_string()),
            iat: now.timestamp(),
            exp,
            iss: (!self.config.issuer.is_empty()).then(|| self.config.issuer.clone()),
            aud: self.config.audience.clone().filter(|a| !a.is_empty()),
            roles: self.user_data.roles.clone(),
            name: self.user_data.name.clone(),
            extra: BTreeMap::from([(
                self.config.username_field.clone(),
                JsonValue::String(expected_username.to_string()),
            )]),
        };

        // A first/last name pair wins over a plain `name` field.
        if let (Some(first), Some(last)) = (&self.user_data.first_name, &self.user_data.last_name) {
            claims.name = Some(format!("{first} {last}"));
        }

        claims
    }
}

impl AuthStrategy for TokenAuthStrategy {
    fn authenticate(&mut self, credentials: &Credentials) -> AuthResult<bool> {
        if !verify_credentials(
            &self.user_data,
            &self.config,
            credentials,
            self.verifier.as_ref(),
        )? {
            return Ok(false);
        }

        let lifetime = self.config.token_lifetime.unwrap_or(Lifetime::DEFAULT);
        let exp = lifetime.resolve(self.clock.now());

        // Presence was already verified above.
        let expected_username = self
            .user_data
            .field(&self.config.username_field)
            .map(str::to_string)
            .ok_or_else(|| AuthError::invalid_user_data(&self.config.username_field))?;

        let claims = self.build_claims(&expected_username, exp);
        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))?;

        debug!(sub = %claims.sub, exp, "minted token");
        self.token = Some(token);
        self.current = Some(claims);

        Ok(true)
    }

    fn is_authenticated(&mut self) -> bool {
        let Some(candidate) = self.token.clone().or_else(|| self.bearer.clone()) else {
            return false;
        };

        match self.decode_token(&candidate) {
            Ok(claims) => {
                self.current = Some(claims);
                true
            }
            Err(err) => {
                debug!(error = %err, "token verification failed");
                false
            }
        }
    }

    fn user(&self) -> Option<UserRecord> {
        self.current
            .as_ref()
            .map(|claims| claims.to_user_record(&self.config.username_field))
    }

    fn logout(&mut self) {
        // Drops every locally held reference; the signed token itself stays
        // valid until `exp` (see the type-level limitation note).
        self.current = None;
        self.token = None;
        self.bearer = None;
    }
}
