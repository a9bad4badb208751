//! Application error types.
//!
//! `BotError` is the top-level error for startup and gateway plumbing.
//! Per-token conversion failures live in their own enum under
//! [`conversion`]; they are collected and reported per message rather than
//! propagated.

pub mod config;
pub mod conversion;

use thiserror::Error;

use crate::error::config::ConfigError;
use crate::profile::StoreError;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Profile store error.
    #[error(transparent)]
    StoreErr(#[from] StoreError),
}

/// Manual conversion from serenity::Error to BotError.
///
/// Boxes the error to reduce the size of the BotError enum, as
/// serenity::Error is very large and would make all BotError variants larger
/// if not boxed.
impl From<serenity::Error> for BotError {
    fn from(err: serenity::Error) -> Self {
        BotError::DiscordErr(Box::new(err))
    }
}
