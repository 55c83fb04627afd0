//! User record value type.
//!
//! Strategies receive an **already-loaded** user record; this crate never
//! queries storage. The record has a small set of named optional fields plus
//! an extension map for configurable fields — the username and password
//! fields live in the map under whatever names the configuration declares
//! (default `email` / `password`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user record as handed to a strategy by the lookup layer.
///
/// # Invariants
/// - The password field holds a salted hash, never plaintext.
/// - Records exposed back to callers (via `AuthStrategy::user`) never carry
///   the password field; see [`UserRecord::sanitized`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Ordered role names, as granted to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Configurable fields (username, password hash, anything else the
    /// caller's schema carries).
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_first_name(mut self, first: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self
    }

    pub fn with_last_name(mut self, last: impl Into<String>) -> Self {
        self.last_name = Some(last.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up an extension field by its configured name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// A copy of this record with the password field removed.
    ///
    /// Every record a strategy hands back to a caller goes through this.
    pub fn sanitized(&self, password_field: &str) -> Self {
        let mut copy = self.clone();
        copy.fields.remove(password_field);
        copy
    }
}
