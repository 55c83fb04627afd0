//! Password verification boundary.
//!
//! Hash algorithm internals stay outside the strategy core: strategies call
//! an opaque "verify candidate against stored hash" primitive through this
//! trait. The default implementation is Argon2 in PHC string format.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier as _, SaltString};
use argon2::Argon2;

use crate::error::{AuthError, AuthResult};

/// Constant-time password verification against a stored hash.
pub trait PasswordVerifier {
    /// `true` when `candidate` matches `stored_hash`.
    ///
    /// Never errors: an unparseable stored hash is a mismatch.
    fn verify(&self, candidate: &str, stored_hash: &str) -> bool;
}

/// Argon2id verification of PHC-format hashes. The default verifier.
#[derive(Debug, Default, Copy, Clone)]
pub struct Argon2Verifier;

impl PasswordVerifier for Argon2Verifier {
    fn verify(&self, candidate: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash a plaintext password into a PHC-format Argon2id string.
///
/// Provided for callers and tests that need to seed user records; the
/// strategies themselves only ever verify.
pub fn hash_password(plain: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("password").unwrap();
        let verifier = Argon2Verifier;

        assert!(verifier.verify("password", &hash));
        assert!(!verifier.verify("wrong", &hash));
    }

    #[test]
    fn garbage_hash_is_a_mismatch_not_an_error() {
        assert!(!Argon2Verifier.verify("password", "not-a-phc-string"));
        assert!(!Argon2Verifier.verify("password", ""));
    }
}
