use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use teloxide::types::ChatId;
use tokio::sync::Mutex;

use super::LanguageStorage;
use crate::locale::Language;

/// Keeps language preferences for the lifetime of the process.
/// Uses an in-memory HashMap wrapped in an async Mutex so the handler can be shared.
#[derive(Default)]
pub struct InMemoryLanguageStorage {
    data: Arc<Mutex<HashMap<ChatId, Language>>>,
}

impl InMemoryLanguageStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LanguageStorage for InMemoryLanguageStorage {
    async fn get_language(&self, chat_id: ChatId) -> Option<Language> {
        self.data.lock().await.get(&chat_id).copied()
    }

    async fn set_language(&self, chat_id: ChatId, language: Language) {
        tracing::debug!("Setting language for chat {chat_id} to {language}");
        self.data.lock().await.insert(chat_id, language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_chat_defaults_to_english() {
        let storage = InMemoryLanguageStorage::new();

        assert_eq!(storage.get_language(ChatId(1)).await, None);
        assert_eq!(storage.effective_language(ChatId(1)).await, Language::English);
    }

    #[tokio::test]
    async fn test_selection_sticks_until_replaced() {
        let storage = InMemoryLanguageStorage::new();
        let chat_id = ChatId(1);

        storage.set_language(chat_id, Language::Arabic).await;
        assert_eq!(storage.effective_language(chat_id).await, Language::Arabic);
        assert_eq!(storage.effective_language(chat_id).await, Language::Arabic);

        storage.set_language(chat_id, Language::English).await;
        assert_eq!(storage.effective_language(chat_id).await, Language::English);
    }

    #[tokio::test]
    async fn test_chats_are_independent() {
        let storage = InMemoryLanguageStorage::new();

        storage.set_language(ChatId(1), Language::Arabic).await;

        assert_eq!(storage.effective_language(ChatId(1)).await, Language::Arabic);
        assert_eq!(storage.effective_language(ChatId(2)).await, Language::English);
    }
}
