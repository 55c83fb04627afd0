//! Session store boundary.
//!
//! The session strategy persists its artifact in an external, process-wide
//! keyed store shared across requests. The store implementation owns the
//! association with the caller's session identifier (cookie, header) and
//! must guarantee that operations under one identifier are linearizable per
//! caller; this core only reads, writes, and destroys.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;

use palisade_core::UserRecord;

/// Session store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    /// The store could not be reached or its state is unusable.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the operation.
    #[error("{0}")]
    Rejected(String),
}

/// External keyed session storage.
///
/// Methods take `&self`; implementations use interior mutability so a store
/// can be shared across strategies and requests.
pub trait SessionStore {
    /// Write an entry. Overwrites any existing entry under `key`.
    fn put(&self, key: &str, user: UserRecord) -> Result<(), SessionStoreError>;

    /// Read an entry, or `None` when absent (or the context was destroyed).
    fn get(&self, key: &str) -> Option<UserRecord>;

    /// Whether an entry exists under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Apply a session/cookie name to the store's context.
    fn set_name(&self, name: &str) -> Result<(), SessionStoreError>;

    /// Apply an absolute expiry instant to the store's context.
    fn set_expiry(&self, expires_at: DateTime<Utc>) -> Result<(), SessionStoreError>;

    /// End the whole session context: every entry, name, and expiry.
    fn destroy(&self) -> Result<(), SessionStoreError>;
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, UserRecord>,
    name: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// In-memory session store.
///
/// Intended for tests/dev; one instance models one caller's session context.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<Inner>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently applied session name, if any.
    pub fn name(&self) -> Option<String> {
        self.inner.read().ok()?.name.clone()
    }

    /// The currently applied expiry, if any.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().ok()?.expires_at
    }
}

impl SessionStore for InMemorySessionStore {
    fn put(&self, key: &str, user: UserRecord) -> Result<(), SessionStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".to_string()))?;
        inner.entries.insert(key.to_string(), user);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<UserRecord> {
        self.inner.read().ok()?.entries.get(key).cloned()
    }

    fn set_name(&self, name: &str) -> Result<(), SessionStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".to_string()))?;
        inner.name = Some(name.to_string());
        Ok(())
    }

    fn set_expiry(&self, expires_at: DateTime<Utc>) -> Result<(), SessionStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".to_string()))?;
        inner.expires_at = Some(expires_at);
        Ok(())
    }

    fn destroy(&self) -> Result<(), SessionStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".to_string()))?;
        *inner = Inner::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_contains() {
        let store = InMemorySessionStore::new();
        assert!(!store.contains("user"));

        store
            .put("user", UserRecord::new().with_id("u-1"))
            .unwrap();
        assert!(store.contains("user"));
        assert_eq!(store.get("user").unwrap().id.as_deref(), Some("u-1"));
    }

    #[test]
    fn destroy_ends_the_whole_context() {
        let store = InMemorySessionStore::new();
        store.put("user", UserRecord::new()).unwrap();
        store.set_name("sid").unwrap();
        store
            .set_expiry(Utc::now() + chrono::Duration::hours(1))
            .unwrap();

        store.destroy().unwrap();

        assert!(!store.contains("user"));
        assert!(store.name().is_none());
        assert!(store.expires_at().is_none());
        // Destroy again: still fine.
        store.destroy().unwrap();
    }
}
