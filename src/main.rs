use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

use artholst_bot::bot::{self, SharedRelay};
use artholst_bot::bot_config::BotConfig;
use artholst_bot::channel::TelegramChannel;
use artholst_bot::logging::init_logging;
use artholst_bot::relay::OrderRelay;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    init_logging();

    info!("Starting ARTHOLST order relay bot");

    let config = BotConfig::from_env()?;
    info!(
        admin_chat_id = %config.admin_chat_id,
        webapp_url = %config.webapp_url,
        "Configuration loaded"
    );

    // Initialize the bot
    let bot = Bot::new(config.bot_token.clone());
    let relay: SharedRelay = Arc::new(OrderRelay::new(TelegramChannel::new(bot.clone()), config));

    if let Err(e) = bot::configure_bot(&bot, &relay).await {
        warn!(error = %e, "Failed to register commands and menu button");
    }

    relay.announce_startup().await;

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema::<TelegramChannel>())
        .dependencies(dptree::deps![relay])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");

    Ok(())
}
