use std::sync::Arc;

use teloxide::types::ChatId;

use crate::{
    bot_handler::BotHandler,
    image::MockImageProvider,
    messaging::{IncomingKind, IncomingUpdate, MessagingError, MockMessagingService},
    pipeline::ImagePipeline,
    storage::{InMemoryLanguageStorage, LanguageStorage},
    translation::MockTranslator,
};

pub const CHAT_ID: ChatId = ChatId(123);

// Builds a handler over mock collaborators and returns the shared storage so
// tests can inspect preferences.
pub fn build_handler(
    mock_messaging: MockMessagingService,
    mock_translator: MockTranslator,
    mock_provider: MockImageProvider,
) -> (BotHandler, Arc<InMemoryLanguageStorage>) {
    build_handler_with_messaging(Arc::new(mock_messaging), mock_translator, mock_provider)
}

pub fn build_handler_with_messaging(
    messaging: Arc<MockMessagingService>,
    mock_translator: MockTranslator,
    mock_provider: MockImageProvider,
) -> (BotHandler, Arc<InMemoryLanguageStorage>) {
    let storage = Arc::new(InMemoryLanguageStorage::new());
    let pipeline = ImagePipeline::new(Arc::new(mock_translator), Arc::new(mock_provider));
    let handler =
        BotHandler::new(messaging, storage.clone() as Arc<dyn LanguageStorage>, pipeline);
    (handler, storage)
}

// Helper to create a text message update
pub fn text_update(id: u32, chat_id: ChatId, text: &str) -> IncomingUpdate {
    IncomingUpdate { id, kind: IncomingKind::Text { chat_id, text: text.to_string() } }
}

// Helper to create a callback query update
pub fn callback_update(id: u32, chat_id: ChatId, data: &str) -> IncomingUpdate {
    IncomingUpdate {
        id,
        kind: IncomingKind::Callback {
            query_id: format!("query-{id}"),
            chat_id,
            data: Some(data.to_string()),
        },
    }
}

pub fn send_failure() -> MessagingError {
    MessagingError::TeloxideRequest(teloxide::RequestError::Api(teloxide::ApiError::BotBlocked))
}
