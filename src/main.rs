use agrobuddy::bot::{self, BotContext, PredictionClient};
use agrobuddy::config::BotConfig;
use agrobuddy::localization::LocalizationManager;
use agrobuddy::logging;
use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    logging::init();

    info!("Starting AgroBuddy Telegram bot");

    let config = BotConfig::from_env().context("Invalid bot configuration")?;

    let client = PredictionClient::new(&config.predict_url, config.request_timeout)?;
    info!("Connecting to prediction API: {}", client.endpoint());
    match client.ping().await {
        Ok(()) => info!("Prediction API is reachable"),
        Err(e) => warn!(error = %e, "Prediction API is not reachable yet, continuing"),
    }

    let localizer = LocalizationManager::new().context("Failed to load translations")?;
    let ctx = Arc::new(BotContext::new(client, localizer));

    let bot = Bot::new(config.telegram_token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry().branch(Update::filter_message().endpoint({
        let ctx = Arc::clone(&ctx);
        move |bot: Bot, msg: Message| {
            let ctx = Arc::clone(&ctx);
            async move { bot::message_handler(bot, msg, ctx).await }
        }
    }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
