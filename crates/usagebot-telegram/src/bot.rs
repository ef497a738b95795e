//! Main Telegram bot implementation.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tokio::sync::watch;
use tracing::{info, warn};

use usagebot_aggregator::UsagePoller;
use usagebot_config::Config;
use usagebot_persistence::SnapshotStore;

use crate::error::{Result, TelegramError};
use crate::handlers::{handle_command, Command};

/// The usage bot: dispatcher plus the background collection loop.
pub struct UsageBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Resolved startup configuration.
    config: Arc<Config>,
    /// Snapshot storage shared by the collector and the lookup handlers.
    store: SnapshotStore,
}

impl UsageBot {
    /// Create a new UsageBot instance.
    ///
    /// Requires `TELEGRAM_BOT_TOKEN` environment variable to be set.
    pub fn new(config: Config) -> Result<Self> {
        let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| TelegramError::NoToken)?;
        let bot = Bot::new(token);
        let store = SnapshotStore::new(&config.snapshot_path);

        Ok(Self {
            bot,
            config: Arc::new(config),
            store,
        })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| TelegramError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Start the bot in polling mode.
    ///
    /// Spawns the usage poller (which performs its first collection run
    /// immediately) and then blocks on the dispatcher until ctrl-c.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting Telegram bot in polling mode...");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut poller = UsagePoller::new(
            Arc::clone(&self.config),
            self.store.clone(),
            shutdown_rx,
        );
        tokio::spawn(async move {
            poller.run().await;
        });

        let store_for_commands = self.store.clone();

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let store = store_for_commands.clone();
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, store).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Commands that start with / but didn't parse.
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(|bot: Bot, msg: Message| async move {
                        if let Some(text) = msg.text() {
                            bot.send_message(
                                msg.chat.id,
                                format!(
                                    "Unknown command: {}\n\nUse /help to see available commands.",
                                    text.split_whitespace().next().unwrap_or(text)
                                ),
                            )
                            .await?;
                        }
                        Ok(())
                    }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        // Dispatcher returned (ctrl-c); stop the collection loop too.
        let _ = shutdown_tx.send(true);
        Ok(())
    }
}
