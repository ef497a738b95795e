//! Error types for panel API calls.

use thiserror::Error;

/// Errors that can occur while talking to a panel.
///
/// All of these are recoverable at the collection level: the affected panel
/// is skipped for the current run and the remaining panels still contribute.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Transport-level failure: unreachable host, timeout, non-2xx status,
    /// or an unreadable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request header derived from the panel URL is not representable.
    #[error("invalid header value derived from panel URL: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// The panel answered, but not with the expected `{ obj: [...] }` shape.
    #[error("malformed panel response: {0}")]
    MalformedResponse(String),
}

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;
