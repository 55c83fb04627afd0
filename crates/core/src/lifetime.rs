//! Artifact lifetime grammar.
//!
//! A lifetime is either an absolute unix expiry instant (used as-is) or a
//! relative-time expression resolved against an injected clock. The grammar
//! for expressions is deliberately closed: `<integer> <unit>` with unit one
//! of seconds/minutes/hours/days (singular or plural). Anything else is a
//! configuration error, never a silent default.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AuthError;

/// Supported units of a relative-time expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" | "seconds" => Ok(TimeUnit::Seconds),
            "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "hour" | "hours" => Ok(TimeUnit::Hours),
            "day" | "days" => Ok(TimeUnit::Days),
            _ => Err(()),
        }
    }
}

/// A parsed relative-time expression, e.g. `"30 minutes"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RelativeTime {
    pub amount: i64,
    pub unit: TimeUnit,
}

impl RelativeTime {
    pub fn new(amount: i64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    pub fn as_seconds(&self) -> i64 {
        self.amount.saturating_mul(self.unit.seconds())
    }
}

impl FromStr for RelativeTime {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AuthError::invalid_lifetime(s));
        };

        let amount: i64 = amount
            .parse()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| AuthError::invalid_lifetime(s))?;
        let unit = TimeUnit::from_str(unit).map_err(|_| AuthError::invalid_lifetime(s))?;

        Ok(Self { amount, unit })
    }
}

impl core::fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.as_str())
    }
}

/// An artifact lifetime: an absolute expiry instant, or an offset from "now".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lifetime {
    /// Absolute unix timestamp, used as the expiry without adjustment.
    Unix(i64),
    /// Relative expression resolved against the strategy's clock.
    Relative(RelativeTime),
}

impl Lifetime {
    /// The default artifact lifetime: one hour from now.
    pub const DEFAULT: Lifetime = Lifetime::Relative(RelativeTime {
        amount: 1,
        unit: TimeUnit::Hours,
    });

    /// Resolve to an absolute unix expiry instant.
    pub fn resolve(&self, now: DateTime<Utc>) -> i64 {
        match self {
            Lifetime::Unix(ts) => *ts,
            Lifetime::Relative(rel) => now.timestamp() + rel.as_seconds(),
        }
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Lifetime {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelativeTime::from_str(s).map(Lifetime::Relative)
    }
}

// Config surface: a JSON number is an absolute instant, a JSON string is a
// relative expression. Unparseable strings fail deserialization.
impl<'de> Deserialize<'de> for Lifetime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Unix(i64),
            Expr(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Unix(ts) => Ok(Lifetime::Unix(ts)),
            Raw::Expr(s) => Lifetime::from_str(&s).map_err(D::Error::custom),
        }
    }
}

impl Serialize for Lifetime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Lifetime::Unix(ts) => serializer.serialize_i64(*ts),
            Lifetime::Relative(rel) => serializer.collect_str(rel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn parses_every_unit_singular_and_plural() {
        for (expr, secs) in [
            ("1 second", 1),
            ("45 seconds", 45),
            ("1 minute", 60),
            ("30 minutes", 1_800),
            ("1 hour", 3_600),
            ("2 hours", 7_200),
            ("1 day", 86_400),
            ("7 days", 604_800),
        ] {
            let rel: RelativeTime = expr.parse().unwrap();
            assert_eq!(rel.as_seconds(), secs, "{expr}");
        }
    }

    #[test]
    fn rejects_unrecognized_expressions() {
        for expr in ["", "hour", "1", "one hour", "1 fortnight", "-5 minutes", "1 hour extra"] {
            let err = RelativeTime::from_str(expr).unwrap_err();
            assert!(matches!(err, AuthError::InvalidLifetime(_)), "{expr}");
        }
    }

    #[test]
    fn unix_lifetime_resolves_as_is() {
        let lifetime = Lifetime::Unix(1_900_000_000);
        assert_eq!(lifetime.resolve(at(0)), 1_900_000_000);
    }

    #[test]
    fn relative_lifetime_resolves_against_now() {
        let lifetime: Lifetime = "2 hours".parse().unwrap();
        assert_eq!(lifetime.resolve(at(1_000)), 1_000 + 7_200);
    }

    #[test]
    fn default_is_one_hour() {
        assert_eq!(Lifetime::default().resolve(at(0)), 3_600);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let unix: Lifetime = serde_json::from_str("1900000000").unwrap();
        assert_eq!(unix, Lifetime::Unix(1_900_000_000));

        let rel: Lifetime = serde_json::from_str("\"15 minutes\"").unwrap();
        assert_eq!(rel.resolve(at(0)), 900);

        assert!(serde_json::from_str::<Lifetime>("\"soonish\"").is_err());
    }

    proptest! {
        /// Property: any amount/unit pair survives a display/parse round trip
        /// and resolves to now + amount * unit.
        #[test]
        fn display_parse_round_trip(amount in 0i64..1_000_000, unit_ix in 0usize..4) {
            let unit = [TimeUnit::Seconds, TimeUnit::Minutes, TimeUnit::Hours, TimeUnit::Days][unit_ix];
            let rel = RelativeTime::new(amount, unit);

            let reparsed: RelativeTime = rel.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, rel);

            let now = at(10_000);
            prop_assert_eq!(
                Lifetime::Relative(rel).resolve(now),
                10_000 + amount * unit.seconds()
            );
        }
    }
}
