//! HTTP client for the x-ui panel admin API.
//!
//! Speaks the two-call protocol the panel web UI uses: a form-encoded login
//! that yields a session cookie, then an inbound list call reusing that
//! cookie. One [`PanelSession`] is created per panel per collection run and
//! discarded afterwards.

pub mod client;
pub mod error;

pub use client::PanelSession;
pub use error::{PanelError, Result};
