use lazy_static::lazy_static;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::{bot_handler::CallbackAction, locale::Language};

lazy_static! {
    /// One row with a button per supported language.
    pub static ref LANGUAGE_KEYBOARD: InlineKeyboardMarkup = InlineKeyboardMarkup::new(vec![
        Language::ALL
            .iter()
            .map(|language| InlineKeyboardButton::callback(
                language.button_label(),
                CallbackAction::SetLanguage(*language).to_payload(),
            ))
            .collect::<Vec<_>>(),
    ]);
}
