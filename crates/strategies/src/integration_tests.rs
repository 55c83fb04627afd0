//! Integration tests across both strategies.
//!
//! Drives the token and session strategies through `dyn AuthStrategy` to
//! verify that the shared contract holds regardless of the artifact
//! mechanism: same error shapes, same negative outcomes, no password
//! exposure, logout invalidation.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use palisade_core::{AuthError, Credentials, StrategyConfig, UserRecord, hash_password};

    use crate::session::SessionAuthStrategy;
    use crate::store::InMemorySessionStore;
    use crate::strategy::AuthStrategy;
    use crate::token::TokenAuthStrategy;

    const TEST_EMAIL: &str = "user@example.com";
    const TEST_PASSWORD: &str = "password";

    fn test_user() -> UserRecord {
        UserRecord::new()
            .with_field("email", TEST_EMAIL)
            .with_field("password", hash_password(TEST_PASSWORD).unwrap())
    }

    fn strategies() -> Vec<Box<dyn AuthStrategy>> {
        palisade_observability::init();

        let token =
            TokenAuthStrategy::new(test_user(), StrategyConfig::with_secret("secret")).unwrap();
        let session = SessionAuthStrategy::new(
            test_user(),
            StrategyConfig::default(),
            Arc::new(InMemorySessionStore::new()),
        );
        vec![Box::new(token), Box::new(session)]
    }

    #[test]
    fn full_lifecycle_is_uniform_across_strategies() {
        for mut strategy in strategies() {
            assert!(!strategy.is_authenticated());
            assert!(strategy.user().is_none());

            let creds = Credentials::new()
                .with("email", TEST_EMAIL)
                .with("password", TEST_PASSWORD);
            assert!(strategy.authenticate(&creds).unwrap());
            assert!(strategy.is_authenticated());

            let user = strategy.user().unwrap();
            assert_eq!(user.field("email"), Some(TEST_EMAIL));
            assert!(!user.has_field("password"));

            strategy.logout();
            assert!(!strategy.is_authenticated());
            assert!(strategy.user().is_none());
        }
    }

    #[test]
    fn scenario_matrix_from_the_contract() {
        for mut strategy in strategies() {
            // Missing password key: malformed input, typed error.
            let err = strategy
                .authenticate(&Credentials::new().with("email", TEST_EMAIL))
                .unwrap_err();
            assert_eq!(err, AuthError::MalformedCredentials);

            // Wrong password value: plain negative outcome.
            let wrong = Credentials::new()
                .with("email", TEST_EMAIL)
                .with("password", "wrong");
            assert_eq!(strategy.authenticate(&wrong).unwrap(), false);
            assert!(!strategy.is_authenticated());

            // Correct credentials: authenticated.
            let good = Credentials::new()
                .with("email", TEST_EMAIL)
                .with("password", TEST_PASSWORD);
            assert!(strategy.authenticate(&good).unwrap());
            assert!(strategy.is_authenticated());
        }
    }
}
