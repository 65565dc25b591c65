use std::str::FromStr;

use crate::locale::Language;

const LANGUAGE_PREFIX: &str = "lang_";

/// Actions carried in inline button payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Switch the chat to the given language.
    SetLanguage(Language),
}

impl CallbackAction {
    /// Payload string attached to the button, e.g. `lang_en`.
    pub fn to_payload(self) -> String {
        match self {
            CallbackAction::SetLanguage(language) => {
                format!("{LANGUAGE_PREFIX}{}", language.code())
            }
        }
    }
}

impl FromStr for CallbackAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(LANGUAGE_PREFIX)
            .ok_or_else(|| format!("unknown callback payload: {s}"))
            .and_then(Language::from_str)
            .map(CallbackAction::SetLanguage)
    }
}
