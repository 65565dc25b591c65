mod callback_actions;
#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

pub use callback_actions::CallbackAction;
use rand::seq::IndexedRandom;
use teloxide::{types::ChatId, utils::command::BotCommands};
use thiserror::Error;

use crate::{
    locale::{Language, LocaleBundle},
    messaging::{IncomingKind, IncomingUpdate, MessagingError, MessagingService},
    pipeline::ImagePipeline,
    storage::LanguageStorage,
};

/// Telegram rejects photo captions longer than this.
const MAX_CAPTION_CHARS: usize = 1024;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Choose the bot language.")]
    Start,
}

/// Errors raised while handling an update.
#[derive(Debug, Error)]
pub enum BotHandlerError {
    /// A reply could not be delivered.
    #[error("Failed to send message: {0}")]
    Messaging(#[from] MessagingError),
}

type Result<T> = std::result::Result<T, BotHandlerError>;

/// Routes updates to language selection or image generation.
pub struct BotHandler {
    messaging_service: Arc<dyn MessagingService>,
    storage: Arc<dyn LanguageStorage>,
    pipeline: ImagePipeline,
}

impl BotHandler {
    /// Creates a new `BotHandler` instance.
    pub fn new(
        messaging_service: Arc<dyn MessagingService>,
        storage: Arc<dyn LanguageStorage>,
        pipeline: ImagePipeline,
    ) -> Self {
        Self { messaging_service, storage, pipeline }
    }

    /// Handles a single update.
    pub async fn handle_update(&self, update: IncomingUpdate) -> Result<()> {
        match update.kind {
            IncomingKind::Callback { query_id, chat_id, data } => {
                self.handle_callback_query(query_id, chat_id, data.as_deref()).await
            }
            IncomingKind::Text { chat_id, text } => self.handle_text(chat_id, &text).await,
            IncomingKind::Other => {
                tracing::debug!("Skipping update {}: nothing to handle", update.id);
                Ok(())
            }
        }
    }

    /// Handle a button press on the language keyboard.
    async fn handle_callback_query(
        &self,
        query_id: String,
        chat_id: ChatId,
        data: Option<&str>,
    ) -> Result<()> {
        let action = data.map(str::parse::<CallbackAction>);

        match action {
            Some(Ok(CallbackAction::SetLanguage(language))) => {
                self.storage.set_language(chat_id, language).await;
                let bundle = language.bundle();

                self.acknowledge(query_id, Some(bundle.language_selected.to_string())).await;
                self.messaging_service.send_text(chat_id, bundle.welcome.to_string()).await?;
            }
            other => {
                tracing::debug!("Ignoring callback query in chat {chat_id}: {other:?}");
                self.acknowledge(query_id, None).await;
            }
        }

        Ok(())
    }

    /// Answers the callback query. Failures are only logged.
    async fn acknowledge(&self, query_id: String, text: Option<String>) {
        if let Err(e) = self.messaging_service.answer_callback_query(query_id, text).await {
            tracing::warn!("Failed to answer callback query: {e}");
        }
    }

    async fn handle_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        match Command::parse(text, "") {
            Ok(Command::Start) => {
                self.messaging_service.send_language_selector(chat_id).await?;
                Ok(())
            }
            Err(_) => self.handle_prompt(chat_id, text).await,
        }
    }

    /// Generate an image for the prompt and send it back, or the localized
    /// error when no image could be produced.
    async fn handle_prompt(&self, chat_id: ChatId, prompt: &str) -> Result<()> {
        let language = self.storage.effective_language(chat_id).await;
        let bundle = language.bundle();

        if let Some(phrase) = working_phrase(bundle) {
            self.messaging_service.send_text(chat_id, phrase.to_string()).await?;
        }

        match self.pipeline.generate(prompt).await {
            Some(image) => {
                let caption = build_caption(bundle.caption_prefix, prompt);
                self.messaging_service.send_photo(chat_id, image, caption).await?;
            }
            None => {
                self.send_error(chat_id, language).await?;
            }
        }

        Ok(())
    }

    async fn send_error(&self, chat_id: ChatId, language: Language) -> Result<()> {
        let error_text = language.bundle().error_text.to_string();
        self.messaging_service.send_text(chat_id, error_text).await?;
        Ok(())
    }
}

fn working_phrase(bundle: &LocaleBundle) -> Option<&'static str> {
    bundle.working_phrases.choose(&mut rand::rng()).copied()
}

/// `prefix`, one space, then the original prompt.
fn build_caption(prefix: &str, prompt: &str) -> String {
    let caption = format!("{prefix} {prompt}");
    if caption.chars().count() <= MAX_CAPTION_CHARS {
        caption
    } else {
        caption.chars().take(MAX_CAPTION_CHARS).collect()
    }
}
