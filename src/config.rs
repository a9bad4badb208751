use crate::error::{config::ConfigError, BotError};

pub struct Config {
    pub discord_bot_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
        })
    }
}
