use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::conversion::units::UnitRegistry;
use crate::error::BotError;
use crate::profile::ProfileStore;

/// Starts the Discord bot in a blocking manner.
///
/// This function creates and starts the Discord bot client. It blocks until
/// the bot shuts down, so call it from the end of `main` or a dedicated
/// tokio task.
///
/// # Arguments
/// - `config` - Application configuration carrying the bot token
/// - `store` - Profile store the conversion engine reads timezones from
/// - `units` - Unit registry shared by every message handler
///
/// # Returns
/// - `Ok(())` if the bot starts and runs until shutdown
/// - `Err(BotError)` if bot initialization or connection fails
pub async fn start_bot(
    config: &Config,
    store: Arc<dyn ProfileStore>,
    units: Arc<UnitRegistry>,
) -> Result<(), BotError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents and must be
    // enabled in the Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler::new(store, units);

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    // Blocks until shutdown
    client.start().await?;

    Ok(())
}
