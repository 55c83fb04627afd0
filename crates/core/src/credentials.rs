//! Per-attempt credential input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The credential map supplied with one authentication attempt.
///
/// Strategies require entries under the configured username and password
/// field names; any other entries are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_membership() {
        let creds = Credentials::new()
            .with("email", "user@example.com")
            .with("password", "password");

        assert!(creds.contains("email"));
        assert_eq!(creds.get("password"), Some("password"));
        assert!(!creds.contains("otp"));
    }

    #[test]
    fn collects_from_pairs() {
        let creds: Credentials = [("login", "alice"), ("secret", "hunter2")]
            .into_iter()
            .collect();
        assert_eq!(creds.get("login"), Some("alice"));
    }
}
