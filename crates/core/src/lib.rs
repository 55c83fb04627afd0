//! `palisade-core` — data contracts for the authentication strategy core.
//!
//! This crate contains **pure value types and seams** (no strategy logic):
//! the user record and credential map, strategy configuration, the lifetime
//! grammar, the clock and password-verification boundaries, and the error
//! taxonomy shared by every strategy.

pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod lifetime;
pub mod password;
pub mod user;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StrategyConfig;
pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use lifetime::{Lifetime, RelativeTime, TimeUnit};
pub use password::{Argon2Verifier, PasswordVerifier, hash_password};
pub use user::UserRecord;
