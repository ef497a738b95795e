//! Panel wire types and the merged per-client record.
//!
//! An x-ui panel returns a list of inbounds. Each inbound carries its client
//! definitions twice: once inside a JSON-encoded `settings` string, and once
//! as a list of live traffic stats. The two halves are joined by email to
//! produce one [`ClientInfo`] per client.

use serde::{Deserialize, Serialize};

/// One inbound entry from `POST /xui/inbound/list`.
///
/// The stats list field is named `clientStats` on current panels and
/// `clientInfo` on older ones; either (or both) may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    /// JSON-encoded settings blob containing the `clients` list.
    pub settings: String,

    /// Per-client traffic stats (current panel versions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_stats: Option<Vec<ClientStat>>,

    /// Per-client traffic stats (older panel versions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_info: Option<Vec<ClientStat>>,
}

impl Inbound {
    /// Parses the settings blob into its client definitions.
    ///
    /// Fails if the blob is not valid JSON or lacks a `clients` list; the
    /// caller skips the inbound in that case.
    pub fn clients(&self) -> Result<Vec<ClientSettings>, serde_json::Error> {
        let blob: SettingsBlob = serde_json::from_str(&self.settings)?;
        Ok(blob.clients)
    }

    /// Resolves which stats list this inbound exposes.
    pub fn stats(&self) -> StatsSource<'_> {
        match (&self.client_stats, &self.client_info) {
            (Some(stats), _) => StatsSource::Primary(stats),
            (None, Some(stats)) => StatsSource::Fallback(stats),
            (None, None) => StatsSource::Empty,
        }
    }
}

/// The parsed shape of an inbound's `settings` string.
#[derive(Debug, Deserialize)]
struct SettingsBlob {
    clients: Vec<ClientSettings>,
}

/// One client definition from an inbound's settings blob.
///
/// Depending on the inbound protocol the client is identified by a UUID
/// (`id`) or a pre-shared password; `email` is always present and joins the
/// definition to its [`ClientStat`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub email: String,
}

impl ClientSettings {
    /// Resolves the downstream identifier for this client.
    ///
    /// A non-empty `id` wins, else a non-empty `password`; a client with
    /// neither cannot be keyed and is excluded from the snapshot.
    pub fn key(&self) -> KeyResolution<'_> {
        match (self.id.as_deref(), self.password.as_deref()) {
            (Some(id), _) if !id.is_empty() => KeyResolution::ById(id),
            (_, Some(password)) if !password.is_empty() => KeyResolution::ByPassword(password),
            _ => KeyResolution::Unresolvable,
        }
    }
}

/// Outcome of resolving a client's snapshot key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResolution<'a> {
    /// Keyed by the client UUID.
    ById(&'a str),
    /// Keyed by the pre-shared password.
    ByPassword(&'a str),
    /// Neither field is populated; the client is skipped.
    Unresolvable,
}

/// Which field an inbound's stats list was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource<'a> {
    /// `clientStats` (current panels).
    Primary(&'a [ClientStat]),
    /// `clientInfo` (older panels).
    Fallback(&'a [ClientStat]),
    /// Neither field present.
    Empty,
}

impl<'a> StatsSource<'a> {
    /// The resolved stats entries, empty when neither field was present.
    pub fn entries(&self) -> &'a [ClientStat] {
        match self {
            StatsSource::Primary(stats) | StatsSource::Fallback(stats) => stats,
            StatsSource::Empty => &[],
        }
    }
}

/// Live traffic stats for one client, joined to settings by `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStat {
    pub email: String,
    pub enable: bool,
    /// Uploaded bytes.
    pub up: i64,
    /// Downloaded bytes.
    pub down: i64,
    /// Traffic quota in bytes; 0 means unlimited.
    pub total: i64,
    /// Expiry as milliseconds since the epoch; 0 or absent means never.
    #[serde(default)]
    pub expiry_time: i64,
}

/// The merged, persisted record for one client: settings identity plus the
/// matching live stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub enable: bool,
    pub uuid: Option<String>,
    pub email: String,
    pub password: Option<String>,
    pub up: i64,
    pub down: i64,
    pub total: i64,
    pub expiry_time: i64,
}

impl ClientInfo {
    /// Builds the merged record from a settings entry and its matching stat.
    pub fn merge(settings: &ClientSettings, stat: &ClientStat) -> Self {
        Self {
            enable: stat.enable,
            uuid: settings.id.clone(),
            email: settings.email.clone(),
            password: settings.password.clone(),
            up: stat.up,
            down: stat.down,
            total: stat.total,
            expiry_time: stat.expiry_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(email: &str) -> ClientStat {
        ClientStat {
            email: email.to_string(),
            enable: true,
            up: 100,
            down: 200,
            total: 0,
            expiry_time: 0,
        }
    }

    #[test]
    fn test_inbound_deserializes_camel_case_fields() {
        let json = r#"{
            "settings": "{\"clients\": []}",
            "clientStats": [
                {"email": "u1@x", "enable": true, "up": 1, "down": 2, "total": 3, "expiryTime": 4}
            ]
        }"#;

        let inbound: Inbound = serde_json::from_str(json).unwrap();
        let stats = inbound.client_stats.as_deref().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].expiry_time, 4);
        assert!(inbound.client_info.is_none());
    }

    #[test]
    fn test_stat_expiry_time_defaults_to_zero() {
        let json = r#"{"email": "u1@x", "enable": false, "up": 0, "down": 0, "total": 0}"#;
        let stat: ClientStat = serde_json::from_str(json).unwrap();
        assert_eq!(stat.expiry_time, 0);
    }

    #[test]
    fn test_clients_parses_settings_blob() {
        let inbound = Inbound {
            settings: r#"{"clients": [{"id": "abc", "email": "u1@x"}]}"#.to_string(),
            client_stats: None,
            client_info: None,
        };

        let clients = inbound.clients().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].id.as_deref(), Some("abc"));
        assert_eq!(clients[0].password, None);
        assert_eq!(clients[0].email, "u1@x");
    }

    #[test]
    fn test_clients_rejects_invalid_blob() {
        let inbound = Inbound {
            settings: "not json".to_string(),
            client_stats: None,
            client_info: None,
        };
        assert!(inbound.clients().is_err());
    }

    #[test]
    fn test_clients_rejects_missing_clients_list() {
        let inbound = Inbound {
            settings: r#"{"decryption": "none"}"#.to_string(),
            client_stats: None,
            client_info: None,
        };
        assert!(inbound.clients().is_err());
    }

    #[test]
    fn test_stats_prefers_primary_field() {
        let inbound = Inbound {
            settings: String::new(),
            client_stats: Some(vec![stat("primary@x")]),
            client_info: Some(vec![stat("fallback@x")]),
        };

        match inbound.stats() {
            StatsSource::Primary(stats) => assert_eq!(stats[0].email, "primary@x"),
            other => panic!("expected primary stats, got {:?}", other),
        }
    }

    #[test]
    fn test_stats_falls_back_to_client_info() {
        let inbound = Inbound {
            settings: String::new(),
            client_stats: None,
            client_info: Some(vec![stat("fallback@x")]),
        };

        match inbound.stats() {
            StatsSource::Fallback(stats) => assert_eq!(stats[0].email, "fallback@x"),
            other => panic!("expected fallback stats, got {:?}", other),
        }
    }

    #[test]
    fn test_stats_empty_when_both_absent() {
        let inbound = Inbound {
            settings: String::new(),
            client_stats: None,
            client_info: None,
        };
        assert_eq!(inbound.stats(), StatsSource::Empty);
        assert!(inbound.stats().entries().is_empty());
    }

    #[test]
    fn test_key_prefers_id() {
        let settings = ClientSettings {
            id: Some("abc".to_string()),
            password: Some("secret".to_string()),
            email: "u1@x".to_string(),
        };
        assert_eq!(settings.key(), KeyResolution::ById("abc"));
    }

    #[test]
    fn test_key_falls_back_to_password() {
        let settings = ClientSettings {
            id: None,
            password: Some("secret".to_string()),
            email: "u1@x".to_string(),
        };
        assert_eq!(settings.key(), KeyResolution::ByPassword("secret"));

        // An empty id is treated as absent.
        let settings = ClientSettings {
            id: Some(String::new()),
            password: Some("secret".to_string()),
            email: "u1@x".to_string(),
        };
        assert_eq!(settings.key(), KeyResolution::ByPassword("secret"));
    }

    #[test]
    fn test_key_unresolvable_without_id_or_password() {
        let settings = ClientSettings {
            id: None,
            password: Some(String::new()),
            email: "u1@x".to_string(),
        };
        assert_eq!(settings.key(), KeyResolution::Unresolvable);
    }

    #[test]
    fn test_client_info_merge_and_wire_format() {
        let settings = ClientSettings {
            id: Some("abc".to_string()),
            password: None,
            email: "u1@x".to_string(),
        };
        let info = ClientInfo::merge(&settings, &stat("u1@x"));

        assert!(info.enable);
        assert_eq!(info.uuid.as_deref(), Some("abc"));
        assert_eq!(info.email, "u1@x");

        let json: serde_json::Value = serde_json::to_value(&info).unwrap();
        assert_eq!(json["uuid"], "abc");
        assert_eq!(json["expiryTime"], 0);
        // Absent credentials serialize as explicit nulls.
        assert!(json["password"].is_null());
    }
}
