//! Telegram front end for the VPN usage bot.
//!
//! Serves `/usage <identifier>` lookups from the snapshot the collector
//! maintains, plus a handful of static informational commands. The bot
//! process owns the collection loop: starting the bot spawns the usage
//! poller beside the dispatcher.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//! - `PANEL_USERNAME` / `PANEL_PASSWORD`: panel operator credentials
//!
//! Optional:
//! - `UPDATE_INTERVAL`: refresh interval in seconds (default: 300)
//! - `PANEL_URLS_FILE`: panel list file (default: `urls.json`)
//! - `USAGEBOT_SNAPSHOT_FILE`: snapshot location override
//!
//! # Commands
//!
//! - `/start` - Welcome message and how to check usage
//! - `/help` - Show available commands
//! - `/usage <id>` - Traffic and expiry for one client
//! - `/price` - Current plan prices
//! - `/downloadlinks` - Client app download links

pub mod bot;
pub mod error;
pub mod format;
pub mod handlers;

pub use bot::UsageBot;
pub use error::{Result, TelegramError};
