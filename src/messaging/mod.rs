mod keyboards;
#[cfg(test)]
mod tests;
mod updates;

use async_trait::async_trait;
pub use keyboards::LANGUAGE_KEYBOARD;
use mockall::automock;
use teloxide::{
    prelude::*,
    types::{AllowedUpdate, ChatId, InputFile},
};
use thiserror::Error;
pub use updates::{IncomingKind, IncomingUpdate};

use crate::{image::GeneratedImage, locale::LANGUAGE_PROMPT};

/// File name used when uploading raw image bytes.
const PHOTO_FILE_NAME: &str = "image.jpg";

/// Errors from the chat platform.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// A Bot API call failed.
    #[error("Teloxide API request failed: {0}")]
    TeloxideRequest(#[from] teloxide::RequestError),
}

type Result<T> = std::result::Result<T, MessagingError>;

/// Trait for talking to the chat platform.
#[automock]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Long-polls for updates newer than `offset`, waiting up to `timeout`
    /// seconds for one to arrive.
    async fn get_updates(&self, offset: Option<i32>, timeout: u32) -> Result<Vec<IncomingUpdate>>;

    /// Sends a plain text message to the provided chat.
    async fn send_text(&self, chat_id: ChatId, text: String) -> Result<()>;

    /// Sends the language selection keyboard.
    async fn send_language_selector(&self, chat_id: ChatId) -> Result<()>;

    /// Sends a generated image with a caption, either by URL or as an upload.
    async fn send_photo(&self, chat_id: ChatId, image: GeneratedImage, caption: String)
    -> Result<()>;

    /// Answers a callback query to clear the button spinner, optionally with
    /// a toast message.
    async fn answer_callback_query(&self, query_id: String, text: Option<String>) -> Result<()>;
}

/// Telegram messaging service.
pub struct TelegramMessagingService {
    bot: Bot,
}

impl TelegramMessagingService {
    /// Wraps an authenticated bot.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessagingService for TelegramMessagingService {
    async fn get_updates(&self, offset: Option<i32>, timeout: u32) -> Result<Vec<IncomingUpdate>> {
        let mut request = self
            .bot
            .get_updates()
            .timeout(timeout)
            .allowed_updates([AllowedUpdate::Message, AllowedUpdate::CallbackQuery]);
        if let Some(offset) = offset {
            request = request.offset(offset);
        }

        let updates = request.await?;
        Ok(updates.into_iter().map(IncomingUpdate::from).collect())
    }

    async fn send_text(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.bot
            .send_message(chat_id, text)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_language_selector(&self, chat_id: ChatId) -> Result<()> {
        self.bot
            .send_message(chat_id, LANGUAGE_PROMPT)
            .reply_markup(LANGUAGE_KEYBOARD.clone())
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: GeneratedImage,
        caption: String,
    ) -> Result<()> {
        let photo = match image {
            GeneratedImage::Url(url) => InputFile::url(url),
            GeneratedImage::Bytes(bytes) => InputFile::memory(bytes).file_name(PHOTO_FILE_NAME),
        };

        self.bot
            .send_photo(chat_id, photo)
            .caption(caption)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn answer_callback_query(&self, query_id: String, text: Option<String>) -> Result<()> {
        let mut request = self.bot.answer_callback_query(query_id);
        if let Some(text) = text {
            request = request.text(text);
        }

        request.await.map(|_| ()).map_err(MessagingError::TeloxideRequest)
    }
}
