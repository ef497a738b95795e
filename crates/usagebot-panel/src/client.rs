//! Authenticated panel session: login plus inbound list fetch.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER};
use tracing::debug;

use usagebot_config::PanelEndpoint;
use usagebot_models::Inbound;

use crate::error::{PanelError, Result};

/// Upper bound on each panel call. An unresponsive panel must not stall the
/// whole refresh; the collector treats a timeout like any other panel error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// An authenticated session against one panel.
///
/// The underlying client keeps the session cookie issued by the login
/// response and replays it on subsequent calls. The session is scoped to
/// one panel's processing within one collection run.
pub struct PanelSession {
    http: reqwest::Client,
    endpoint: PanelEndpoint,
}

impl PanelSession {
    /// Logs in to the panel and returns a session ready for data calls.
    ///
    /// The login response is used only for its cookie; per the panel's
    /// behavior there is no reliable status signal here, and a rejected
    /// login simply surfaces as an empty or malformed list response later.
    pub async fn login(
        endpoint: &PanelEndpoint,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_store(true)
            .default_headers(browser_headers(endpoint)?)
            .build()?;

        debug!(panel = %endpoint, "logging in");
        let form = [("username", username), ("password", password)];
        http.post(endpoint.login_url()).form(&form).send().await?;

        Ok(Self {
            http,
            endpoint: endpoint.clone(),
        })
    }

    /// Fetches the full inbound list using the established session.
    pub async fn fetch_inbounds(&self) -> Result<Vec<Inbound>> {
        debug!(panel = %self.endpoint, "fetching inbound list");
        let response = self
            .http
            .post(self.endpoint.inbound_list_url())
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        parse_inbound_list(body)
    }
}

/// Extracts the inbound records from a list response body.
///
/// The panel wraps its payload as `{ obj: [ ... ] }`; a missing or
/// non-array `obj` is a malformed response.
pub fn parse_inbound_list(body: serde_json::Value) -> Result<Vec<Inbound>> {
    let obj = body
        .get("obj")
        .ok_or_else(|| PanelError::MalformedResponse("missing obj field".to_string()))?;

    if !obj.is_array() {
        return Err(PanelError::MalformedResponse(
            "obj field is not a list".to_string(),
        ));
    }

    serde_json::from_value(obj.clone())
        .map_err(|e| PanelError::MalformedResponse(format!("bad inbound record: {}", e)))
}

/// Headers the panel web UI sends for its own XHR calls.
///
/// The panel validates Origin/Referer against its configured domain, so the
/// values are derived from the endpoint rather than hardcoded.
fn browser_headers(endpoint: &PanelEndpoint) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
    );
    headers.insert(
        "X-Requested-With",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(ORIGIN, HeaderValue::from_str(endpoint.origin())?);
    headers.insert(REFERER, HeaderValue::from_str(&endpoint.referer())?);
    Ok(headers)
}
