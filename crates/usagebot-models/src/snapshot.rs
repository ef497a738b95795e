//! The consolidated usage snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::ClientInfo;

/// A point-in-time mapping from resolved client identifier to the client's
/// merged usage record.
///
/// The snapshot is rebuilt from scratch on every collection run and fully
/// replaces its predecessor on disk. Keys are unique; inserting an existing
/// identifier overwrites (last write wins). The ordered map keeps the
/// serialized form stable, so identical panel responses produce identical
/// files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageSnapshot {
    clients: BTreeMap<String, ClientInfo>,
}

impl UsageSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the previously stored record for the
    /// identifier if there was one.
    pub fn insert(&mut self, identifier: impl Into<String>, info: ClientInfo) -> Option<ClientInfo> {
        self.clients.insert(identifier.into(), info)
    }

    /// Looks up a record by identifier.
    pub fn get(&self, identifier: &str) -> Option<&ClientInfo> {
        self.clients.get(identifier)
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Iterates over (identifier, record) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClientInfo)> {
        self.clients.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(email: &str, up: i64) -> ClientInfo {
        ClientInfo {
            enable: true,
            uuid: None,
            email: email.to_string(),
            password: None,
            up,
            down: 0,
            total: 0,
            expiry_time: 0,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut snapshot = UsageSnapshot::new();
        assert!(snapshot.is_empty());

        snapshot.insert("abc", info("u1@x", 10));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("abc").unwrap().email, "u1@x");
        assert!(snapshot.get("zzz").is_none());
    }

    #[test]
    fn test_insert_overwrites_existing_key() {
        let mut snapshot = UsageSnapshot::new();
        snapshot.insert("abc", info("u1@x", 10));
        let replaced = snapshot.insert("abc", info("u1@x", 20));

        assert_eq!(replaced.unwrap().up, 10);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("abc").unwrap().up, 20);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut snapshot = UsageSnapshot::new();
        snapshot.insert("b", info("u2@x", 2));
        snapshot.insert("a", info("u1@x", 1));

        let json = serde_json::to_string(&snapshot).unwrap();
        // Transparent map, deterministic key order.
        assert!(json.starts_with(r#"{"a""#));

        let back: UsageSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
