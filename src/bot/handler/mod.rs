use std::sync::Arc;

use serenity::all::{Context, EventHandler, Message, Ready};
use serenity::async_trait;

use crate::conversion::units::UnitRegistry;
use crate::profile::ProfileStore;

pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub store: Arc<dyn ProfileStore>,
    pub units: Arc<UnitRegistry>,
}

impl Handler {
    pub fn new(store: Arc<dyn ProfileStore>, units: Arc<UnitRegistry>) -> Self {
        Self { store, units }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self.store.as_ref(), &self.units, ctx, message).await;
    }
}
