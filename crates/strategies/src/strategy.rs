//! The authentication strategy contract.

use palisade_core::{AuthError, AuthResult, Credentials, PasswordVerifier, StrategyConfig, UserRecord};

/// Capability contract every authentication strategy implements.
///
/// The fatal/non-fatal split is encoded in the signatures: `authenticate`
/// either fails with a typed [`AuthError`] (misconfiguration, malformed
/// input) or reports a plain boolean outcome — a wrong username or password
/// is `Ok(false)`, never an error. `is_authenticated` swallows artifact
/// verification failures and reports `false`.
pub trait AuthStrategy {
    /// Verify the supplied credentials and, on success, create the
    /// strategy's identity artifact.
    fn authenticate(&mut self, credentials: &Credentials) -> AuthResult<bool>;

    /// Whether a valid identity artifact is currently known.
    ///
    /// Never errors: a missing, expired, or tampered artifact is `false`.
    fn is_authenticated(&mut self) -> bool;

    /// The currently known identity, or `None` when unauthenticated.
    ///
    /// Returned records never carry the password field.
    fn user(&self) -> Option<UserRecord>;

    /// Invalidate the current artifact. Idempotent.
    fn logout(&mut self);
}

/// Shared credential verification pipeline (steps 1–4 of `authenticate`,
/// identical for both strategies):
///
/// 1. user record missing the configured username/password field →
///    [`AuthError::InvalidUserData`] (a configuration fault);
/// 2. credential map missing either key → [`AuthError::MalformedCredentials`]
///    (bad input shape, checked before any value comparison);
/// 3. username value mismatch (exact, case-sensitive) → `Ok(false)`;
/// 4. password verification failure → `Ok(false)`.
pub(crate) fn verify_credentials(
    user: &UserRecord,
    config: &StrategyConfig,
    credentials: &Credentials,
    verifier: &dyn PasswordVerifier,
) -> AuthResult<bool> {
    let username_field = config.username_field.as_str();
    let password_field = config.password_field.as_str();

    let Some(expected_username) = user.field(username_field) else {
        return Err(AuthError::invalid_user_data(username_field));
    };
    let Some(stored_hash) = user.field(password_field) else {
        return Err(AuthError::invalid_user_data(password_field));
    };

    let (Some(supplied_username), Some(supplied_password)) =
        (credentials.get(username_field), credentials.get(password_field))
    else {
        return Err(AuthError::MalformedCredentials);
    };

    if supplied_username != expected_username {
        tracing::debug!(field = username_field, "username mismatch");
        return Ok(false);
    }

    if !verifier.verify(supplied_password, stored_hash) {
        tracing::debug!("password verification failed");
        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_core::{Argon2Verifier, hash_password};

    fn test_user() -> UserRecord {
        UserRecord::new()
            .with_field("email", "user@example.com")
            .with_field("password", hash_password("password").unwrap())
    }

    #[test]
    fn missing_user_fields_is_a_configuration_fault() {
        let config = StrategyConfig::default();
        let creds = Credentials::new()
            .with("email", "user@example.com")
            .with("password", "password");

        let no_email = UserRecord::new().with_field("password", "hash");
        let err = verify_credentials(&no_email, &config, &creds, &Argon2Verifier).unwrap_err();
        assert_eq!(err, AuthError::invalid_user_data("email"));

        let no_password = UserRecord::new().with_field("email", "user@example.com");
        let err = verify_credentials(&no_password, &config, &creds, &Argon2Verifier).unwrap_err();
        assert_eq!(err, AuthError::invalid_user_data("password"));
    }

    #[test]
    fn missing_credential_keys_is_malformed_input() {
        let config = StrategyConfig::default();
        let user = test_user();

        for creds in [
            Credentials::new(),
            Credentials::new().with("email", "user@example.com"),
            Credentials::new().with("password", "password"),
        ] {
            let err = verify_credentials(&user, &config, &creds, &Argon2Verifier).unwrap_err();
            assert_eq!(err, AuthError::MalformedCredentials);
        }
    }

    #[test]
    fn malformed_check_precedes_value_comparison() {
        // Even with a wrong username value present, a missing password key is
        // still a malformed-credentials error, not a false outcome.
        let config = StrategyConfig::default();
        let user = test_user();
        let creds = Credentials::new().with("email", "someone-else@example.com");

        let err = verify_credentials(&user, &config, &creds, &Argon2Verifier).unwrap_err();
        assert_eq!(err, AuthError::MalformedCredentials);
    }

    #[test]
    fn wrong_values_are_a_negative_outcome_not_an_error() {
        let config = StrategyConfig::default();
        let user = test_user();

        let wrong_user = Credentials::new()
            .with("email", "USER@EXAMPLE.COM") // comparison is case-sensitive
            .with("password", "password");
        assert_eq!(
            verify_credentials(&user, &config, &wrong_user, &Argon2Verifier).unwrap(),
            false
        );

        let wrong_password = Credentials::new()
            .with("email", "user@example.com")
            .with("password", "wrong");
        assert_eq!(
            verify_credentials(&user, &config, &wrong_password, &Argon2Verifier).unwrap(),
            false
        );
    }

    #[test]
    fn matching_credentials_pass() {
        let config = StrategyConfig::default();
        let user = test_user();
        let creds = Credentials::new()
            .with("email", "user@example.com")
            .with("password", "password")
            .with("remember_me", "yes"); // unknown keys are ignored

        assert!(verify_credentials(&user, &config, &creds, &Argon2Verifier).unwrap());
    }
}
