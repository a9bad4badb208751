//! Discord bot integration for inline conversions.
//!
//! The bot listens to guild messages and, when a message carries `{...}`
//! conversion tokens, replies with the converted times and quantities. All
//! of the actual conversion work lives in [`crate::conversion`]; this module
//! only wires the gateway events to it and renders the result as a Discord
//! message.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive events about guild creation, updates, and deletion
//! - `GUILD_MESSAGES` - Receive events about messages in guilds
//! - `GUILD_MEMBERS` - Receive events about guild member changes (privileged intent)
//! - `MESSAGE_CONTENT` - Read message text to find conversion tokens (privileged intent)
//!
//! Note: privileged intents must be explicitly enabled in the Discord
//! Developer Portal for the bot application.

pub mod handler;
pub mod start;
