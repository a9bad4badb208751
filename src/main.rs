mod bot;
mod config;
mod conversion;
mod error;
mod profile;
mod timezone;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::conversion::units::UnitRegistry;
use crate::error::BotError;
use crate::profile::memory::MemoryStore;
use crate::profile::ProfileStore;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn ProfileStore> = Arc::new(MemoryStore::new());
    let units = Arc::new(UnitRegistry::standard());

    bot::start::start_bot(&config, store, units).await
}
