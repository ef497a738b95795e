//! Snapshot store: the single shared file behind the lookup interface.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use usagebot_models::{ClientInfo, UsageSnapshot};

use crate::atomic::{atomic_write_json, read_json};
use crate::error::Result;

/// Outcome of a snapshot lookup.
///
/// "No snapshot yet" and "identifier unknown" are distinct conditions: the
/// former means the collector has not completed a run (or the file is
/// unreadable), the latter that a current snapshot exists but has no such
/// client.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The identifier resolved to a client record.
    Found(ClientInfo),
    /// A snapshot exists but contains no such identifier.
    UnknownClient,
    /// No servable snapshot exists.
    NoSnapshot,
}

/// File-backed storage for the usage snapshot.
///
/// A deliberately small interface (`save`, `load`, `lookup`) so the flat
/// JSON file could later be swapped for an embedded store without touching
/// the collector or the bot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replaces the persisted snapshot.
    ///
    /// On failure the previous snapshot file is untouched and remains
    /// servable; the next collection run simply retries.
    pub fn save(&self, snapshot: &UsageSnapshot) -> Result<()> {
        atomic_write_json(&self.path, snapshot)?;
        debug!(path = %self.path.display(), clients = snapshot.len(), "snapshot saved");
        Ok(())
    }

    /// Loads the persisted snapshot, `None` when no run has completed yet.
    pub fn load(&self) -> Result<Option<UsageSnapshot>> {
        read_json(&self.path)
    }

    /// Looks up one client by resolved identifier.
    ///
    /// Never fails: an unreadable or corrupt snapshot file is logged and
    /// reported as [`LookupOutcome::NoSnapshot`], so a caller holding any
    /// identifier string always gets an answer.
    pub fn lookup(&self, identifier: &str) -> LookupOutcome {
        let snapshot = match self.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return LookupOutcome::NoSnapshot,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to load snapshot");
                return LookupOutcome::NoSnapshot;
            }
        };

        match snapshot.get(identifier) {
            Some(info) => LookupOutcome::Found(info.clone()),
            None => LookupOutcome::UnknownClient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use usagebot_models::ClientInfo;

    fn info(email: &str) -> ClientInfo {
        ClientInfo {
            enable: true,
            uuid: Some("abc".to_string()),
            email: email.to_string(),
            password: None,
            up: 100,
            down: 200,
            total: 0,
            expiry_time: 0,
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("clients.json"));

        let mut snapshot = UsageSnapshot::new();
        snapshot.insert("abc", info("u1@x"));
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_before_first_run_is_none() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("clients.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_lookup_found() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("clients.json"));

        let mut snapshot = UsageSnapshot::new();
        snapshot.insert("abc", info("u1@x"));
        store.save(&snapshot).unwrap();

        match store.lookup("abc") {
            LookupOutcome::Found(found) => assert_eq!(found, info("u1@x")),
            other => panic!("expected found, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_unknown_client() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("clients.json"));
        store.save(&UsageSnapshot::new()).unwrap();

        assert_eq!(store.lookup("zzz"), LookupOutcome::UnknownClient);
    }

    #[test]
    fn test_lookup_without_snapshot() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("clients.json"));
        assert_eq!(store.lookup("abc"), LookupOutcome::NoSnapshot);
    }

    #[test]
    fn test_lookup_with_corrupt_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clients.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SnapshotStore::new(path);
        assert_eq!(store.lookup("abc"), LookupOutcome::NoSnapshot);
    }

    #[test]
    fn test_snapshot_file_is_plain_keyed_object() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("clients.json"));

        let mut snapshot = UsageSnapshot::new();
        snapshot.insert("abc", info("u1@x"));
        store.save(&snapshot).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["abc"]["email"], "u1@x");
        assert_eq!(value["abc"]["expiryTime"], 0);
    }
}
