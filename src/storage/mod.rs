mod memory_storage;

use async_trait::async_trait;
pub use memory_storage::InMemoryLanguageStorage;
use mockall::automock;
use teloxide::types::ChatId;

use crate::locale::Language;

/// Per-chat language preferences.
#[automock]
#[async_trait]
pub trait LanguageStorage: Send + Sync {
    /// Get the language explicitly selected in a chat, if any.
    async fn get_language(&self, chat_id: ChatId) -> Option<Language>;

    /// Record the language selected in a chat, replacing any earlier choice.
    async fn set_language(&self, chat_id: ChatId, language: Language);

    /// Get the language to use for a chat, falling back to the default.
    async fn effective_language(&self, chat_id: ChatId) -> Language {
        self.get_language(chat_id).await.unwrap_or_default()
    }
}
