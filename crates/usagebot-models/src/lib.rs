//! Core data models for the VPN usage bot.
//!
//! This crate defines the panel wire types (inbounds, client settings and
//! per-client traffic stats), the merged per-client record the bot serves,
//! and the consolidated usage snapshot keyed by client identifier.

pub mod client;
pub mod snapshot;

pub use client::{ClientInfo, ClientSettings, ClientStat, Inbound, KeyResolution, StatsSource};
pub use snapshot::UsageSnapshot;
