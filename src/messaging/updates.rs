use teloxide::types::{ChatId, Update, UpdateKind};

/// Platform update reduced to what the bot acts on.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingUpdate {
    /// Monotonically increasing update identifier.
    pub id: u32,
    /// What the update carries.
    pub kind: IncomingKind,
}

/// The kinds of update the bot distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingKind {
    /// An inline button was pressed.
    Callback {
        /// Identifier used to answer the query.
        query_id: String,
        /// Chat the button belongs to.
        chat_id: ChatId,
        /// Payload attached to the button.
        data: Option<String>,
    },
    /// A text message was received.
    Text {
        /// Chat the message was sent in.
        chat_id: ChatId,
        /// Message text.
        text: String,
    },
    /// Anything else; only advances the offset.
    Other,
}

impl IncomingUpdate {
    /// Offset that acknowledges this update on the next poll.
    pub fn next_offset(&self) -> i32 {
        i32::try_from(self.id).unwrap_or(i32::MAX).saturating_add(1)
    }
}

impl From<Update> for IncomingUpdate {
    fn from(update: Update) -> Self {
        let kind = match update.kind {
            UpdateKind::Message(msg) => match msg.text() {
                Some(text) => IncomingKind::Text { chat_id: msg.chat.id, text: text.to_string() },
                None => IncomingKind::Other,
            },
            UpdateKind::CallbackQuery(query) => {
                // Fall back to the sender's private chat when the message is unavailable.
                let chat_id = query
                    .message
                    .as_ref()
                    .map(|message| message.chat().id)
                    .unwrap_or_else(|| ChatId::from(query.from.id));

                IncomingKind::Callback { query_id: query.id.to_string(), chat_id, data: query.data }
            }
            _ => IncomingKind::Other,
        };

        Self { id: update.id.0, kind }
    }
}
