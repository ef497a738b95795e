//! Command handlers for the Telegram bot.

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

use usagebot_persistence::{LookupOutcome, SnapshotStore};

use crate::format;

/// Static tariff text, edited by the operator to match current plans.
const PRICE_MESSAGE: &str = "📍 Monthly packages:\n\
    10 GB — basic\n\
    20 GB — standard\n\
    40 GB — family\n\n\
    📍 Volume packages (no time limit) are also available.\n\n\
    📌 Every package comes with a dedicated config bound to your account.\n\
    Contact the operator to order or renew.";

/// Client app download links, per platform.
const DOWNLOAD_LINKS_MESSAGE: &str = "📌 v2rayNG for Android:\n\
    https://github.com/2dust/v2rayNG/releases/download/1.7.38/v2rayNG_1.7.38.apk\n\n\
    📌 Fair VPN for iPhone (App Store):\n\
    https://apps.apple.com/us/app/fair-vpn/id1533873488\n\n\
    📌 v2rayN for Windows:\n\
    https://github.com/2dust/v2rayN/releases/download/6.12/v2rayN-With-Core.zip\n\n\
    📌 v2rayx / trojanx for macOS:\n\n\
    📍 v2rayx\n\
    https://github.com/Cenmrev/V2RayX/releases/download/v1.5.1/V2RayX.app.zip\n\n\
    📍 trojanx\n\
    https://github.com/JimLee1996/TrojanX/releases/download/0.4/TrojanX.app.zip";

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Welcome message and how to check your usage")]
    Start,

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Show traffic and expiry for a client: /usage <id>")]
    Usage(String),

    #[command(description = "Show current plan prices")]
    Price,

    #[command(description = "Client app download links")]
    Downloadlinks,
}

/// Dispatch a parsed command to its handler.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: SnapshotStore,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => handle_start(bot, msg).await,
        Command::Help => handle_help(bot, msg).await,
        Command::Usage(identifier) => handle_usage(bot, msg, store, identifier).await,
        Command::Price => handle_price(bot, msg).await,
        Command::Downloadlinks => handle_download_links(bot, msg).await,
    }
}

/// Handle the /start command.
async fn handle_start(bot: Bot, msg: Message) -> ResponseResult<()> {
    let welcome = "To check your remaining VPN traffic, send /usage followed by your UUID.\n\n\
        Example:\n\
        /usage f745f1-972c-4b4y3-cefa-569e0bfc1b16";
    bot.send_message(msg.chat.id, welcome).await?;

    info!(chat_id = %msg.chat.id, "User started bot");
    Ok(())
}

/// Handle the /help command.
async fn handle_help(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

/// Handle the /usage command: look the identifier up in the snapshot.
///
/// Whatever state the snapshot is in, the user always gets a reply; lookup
/// itself never fails.
async fn handle_usage(
    bot: Bot,
    msg: Message,
    store: SnapshotStore,
    identifier: String,
) -> ResponseResult<()> {
    let identifier = identifier.trim();

    if identifier.is_empty() {
        bot.send_message(
            msg.chat.id,
            "Please provide your client identifier.\n\nUsage: /usage <id>",
        )
        .await?;
        return Ok(());
    }

    let reply = match store.lookup(identifier) {
        LookupOutcome::Found(info) => format::usage_card(&info),
        LookupOutcome::UnknownClient => {
            "Unfortunately no client was found for the requested identifier.".to_string()
        }
        LookupOutcome::NoSnapshot => {
            "Usage data has not been collected yet. Please try again in a few minutes.".to_string()
        }
    };

    info!(chat_id = %msg.chat.id, "Usage lookup");
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Handle the /price command.
async fn handle_price(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, PRICE_MESSAGE).await?;
    Ok(())
}

/// Handle the /downloadlinks command.
async fn handle_download_links(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, DOWNLOAD_LINKS_MESSAGE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_command_parses_identifier() {
        let cmd = Command::parse("/usage abc-123", "usagebot").unwrap();
        match cmd {
            Command::Usage(id) => assert_eq!(id, "abc-123"),
            other => panic!("expected usage command, got {:?}", other),
        }
    }

    #[test]
    fn test_usage_command_without_argument_is_empty() {
        let cmd = Command::parse("/usage", "usagebot").unwrap();
        assert!(matches!(cmd, Command::Usage(id) if id.is_empty()));
    }

    #[test]
    fn test_static_commands_parse() {
        assert!(matches!(
            Command::parse("/start", "usagebot"),
            Ok(Command::Start)
        ));
        assert!(matches!(
            Command::parse("/price", "usagebot"),
            Ok(Command::Price)
        ));
        assert!(matches!(
            Command::parse("/downloadlinks", "usagebot"),
            Ok(Command::Downloadlinks)
        ));
    }

    #[test]
    fn test_unknown_command_does_not_parse() {
        assert!(Command::parse("/refund", "usagebot").is_err());
    }
}
