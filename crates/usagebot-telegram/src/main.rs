//! VPN usage bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p usagebot-telegram
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use usagebot_config::Config;
use usagebot_telegram::UsageBot;

/// VPN usage bot - per-client traffic lookups from x-ui panels via Telegram
#[derive(Parser, Debug)]
#[command(name = "usagebot-telegram")]
#[command(about = "Telegram bot reporting VPN client usage collected from x-ui panels")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Credentials and panel list come from the environment / .env file.
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "usagebot_telegram=info,usagebot_aggregator=info,teloxide=warn",
        1 => "usagebot_telegram=debug,usagebot_aggregator=debug,usagebot_panel=debug,teloxide=info",
        2 => "usagebot_telegram=trace,usagebot_aggregator=trace,usagebot_panel=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Configuration errors are fatal: the refresh loop must not start with
    // a broken panel list or missing credentials.
    let config = Config::from_env()?;

    let bot = UsageBot::new(config)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n[robot] VPN usage bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\n[phone] Open Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await?;

    Ok(())
}
