//! Periodic usage collection for the VPN usage bot.
//!
//! Each collection run authenticates against every configured panel,
//! fetches its inbound records, joins per-client settings with per-client
//! live stats, and atomically replaces the persisted usage snapshot. One
//! panel failing (unreachable, timed out, malformed) never aborts the run;
//! the snapshot is built from whatever panels answered.
//!
//! [`UsagePoller`] drives [`refresh_once`] on the configured interval, with
//! an immediate first run at startup.

pub mod collector;
pub mod poller;

pub use collector::{merge_inbounds, refresh_once};
pub use poller::UsagePoller;
