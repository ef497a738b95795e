//! Panel endpoint validation and derived request URLs.

use url::Url;

use crate::error::{ConfigError, Result};

/// A validated panel base URL plus the origin derived from it.
///
/// Panels are configured as `scheme://host/segment` — the trailing segment
/// is the panel's web base path. The origin is sent in browser-emulating
/// request headers so the panel treats the calls as same-origin XHR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEndpoint {
    base_url: String,
    origin: String,
}

impl PanelEndpoint {
    /// Parses and validates a configured panel URL.
    ///
    /// Rejects anything that is not `http(s)://host/segment`; a malformed
    /// entry is a configuration error and fails startup rather than a run.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidPanelUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidPanelUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidPanelUrl {
                url: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        let has_segment = url
            .path_segments()
            .is_some_and(|mut segments| segments.any(|s| !s.is_empty()));
        if !has_segment {
            return Err(ConfigError::InvalidPanelUrl {
                url: raw.to_string(),
                reason: "missing panel base path segment".to_string(),
            });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            origin: url.origin().ascii_serialization(),
        })
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The origin (`scheme://host[:port]`) derived from the base URL.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The referer the panel web UI would send for inbound list calls.
    pub fn referer(&self) -> String {
        format!("{}/xui/inbounds", self.base_url)
    }

    /// The login endpoint.
    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    /// The inbound list endpoint.
    pub fn inbound_list_url(&self) -> String {
        format!("{}/xui/inbound/list", self.base_url)
    }
}

impl std::fmt::Display for PanelEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base_url)
    }
}
