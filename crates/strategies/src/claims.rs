//! Token claim model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use palisade_core::UserRecord;

/// The claim set embedded in a signed token.
///
/// `sub`, `iat` and `exp` are always present; `iss`/`aud`/`roles`/`name`
/// appear only when configured or carried by the user record. The restated
/// username field lives in the flattened map under its configured name
/// (default `email`), since that name is not known statically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id when present, else the username value.
    pub sub: String,

    /// Issue time (unix seconds).
    pub iat: i64,

    /// Expiry (unix seconds).
    pub exp: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Dynamically named claims — the restated username field.
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl TokenClaims {
    /// The restated username value, if present under the configured name.
    pub fn username(&self, username_field: &str) -> Option<&str> {
        self.extra.get(username_field)?.as_str()
    }

    /// Project the claim set back into a user record for `user()` callers.
    ///
    /// Claims never contain a password field, so the result is sanitized by
    /// construction.
    pub fn to_user_record(&self, username_field: &str) -> UserRecord {
        let mut user = UserRecord::new().with_id(self.sub.clone());
        if let Some(roles) = &self.roles {
            user = user.with_roles(roles.clone());
        }
        if let Some(name) = &self.name {
            user = user.with_name(name.clone());
        }
        if let Some(value) = self.username(username_field) {
            user = user.with_field(username_field, value);
        }
        user
    }
}
