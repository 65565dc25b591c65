#![warn(missing_docs)]
//! A Telegram bot that turns text descriptions into images.
//!
//! Prompts are translated to English, sent to an image generation service,
//! and the picture is relayed back to the chat. Users pick between an English
//! and an Arabic interface with `/start`.

/// The main handler for the bot's logic.
pub mod bot_handler;
/// The configuration for the application.
pub mod config;
/// Clients for image generation services.
pub mod image;
/// Languages and the user-facing strings for each.
pub mod locale;
/// The service for talking to Telegram.
pub mod messaging;
/// Translation followed by image generation.
pub mod pipeline;
/// The long-polling loop feeding updates to the handler.
pub mod poller;
/// The storage layer for language preferences.
pub mod storage;
/// The client for translating prompts.
pub mod translation;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::{
    bot_handler::{BotHandler, Command},
    config::{Config, ImageProviderKind},
    image::{ImageProvider, PollinationsProvider, WebsimProvider},
    messaging::TelegramMessagingService,
    pipeline::ImagePipeline,
    poller::UpdatePoller,
    storage::InMemoryLanguageStorage,
    translation::GoogleTranslator,
};

/// Extra time the HTTP client waits beyond the long-poll timeout.
const POLL_REQUEST_MARGIN: u64 = 10;

/// Runs the bot.
pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let client = teloxide::net::default_reqwest_settings()
        .timeout(Duration::from_secs(u64::from(config.poll_timeout) + POLL_REQUEST_MARGIN))
        .build()
        .context("Failed to build Telegram HTTP client")?;
    let bot = Bot::with_client(config.telegram_bot_token.clone(), client);

    let translator = Arc::new(
        GoogleTranslator::new(&config.translate_url, config.translate_timeout)
            .context("Failed to create translation client")?,
    );
    let image_provider: Arc<dyn ImageProvider> = match &config.image_provider {
        ImageProviderKind::Websim { project_id } => Arc::new(
            WebsimProvider::new(&config.websim_api_url, project_id, config.image_timeout)
                .context("Failed to create Websim client")?,
        ),
        ImageProviderKind::Pollinations => Arc::new(
            PollinationsProvider::new(
                &config.pollinations_url,
                config.image_width,
                config.image_height,
                config.image_timeout,
            )
            .context("Failed to create Pollinations client")?,
        ),
    };
    tracing::debug!("Image provider configured: {:?}", config.image_provider);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to register bot commands: {e}");
    }

    let messaging_service = Arc::new(TelegramMessagingService::new(bot));
    let storage = Arc::new(InMemoryLanguageStorage::new());
    let pipeline = ImagePipeline::new(translator, image_provider);
    let handler = Arc::new(BotHandler::new(messaging_service.clone(), storage, pipeline));

    UpdatePoller::new(
        messaging_service,
        handler,
        config.poll_timeout,
        config.idle_pause,
        config.error_pause,
    )
    .run()
    .await;

    Ok(())
}
