//! `palisade-strategies` — pluggable authentication strategies.
//!
//! One contract ([`AuthStrategy`]) for verifying a caller's credentials and
//! producing/consulting an identity artifact, with two implementations:
//!
//! - [`TokenAuthStrategy`] mints and verifies signed, claims-bearing tokens
//!   (compact JWS); stateless beyond the signature itself.
//! - [`SessionAuthStrategy`] writes a sanitized user record into an external
//!   [`SessionStore`] under a fixed key and reads/clears it.
//!
//! This crate is intentionally decoupled from HTTP and storage: the boundary
//! layer extracts headers/cookies and hands the strategy an already-loaded
//! user record plus explicit inputs.

pub mod claims;
pub mod session;
pub mod store;
pub mod strategy;
pub mod token;

#[cfg(test)]
mod integration_tests;

pub use claims::TokenClaims;
pub use session::{SESSION_USER_KEY, SessionAuthStrategy};
pub use store::{InMemorySessionStore, SessionStore, SessionStoreError};
pub use strategy::AuthStrategy;
pub use token::TokenAuthStrategy;
