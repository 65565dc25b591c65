use std::{fmt, str::FromStr};

/// Languages the bot can talk in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    /// English, used until a chat picks a language.
    #[default]
    English,
    /// Arabic.
    Arabic,
}

impl Language {
    /// All supported languages, in the order they are offered to the user.
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Label shown on the language selection button.
    pub fn button_label(self) -> &'static str {
        match self {
            Language::English => "English 🇬🇧",
            Language::Arabic => "العربية 🇸🇦",
        }
    }

    /// The strings used when talking to a user in this language.
    pub fn bundle(self) -> &'static LocaleBundle {
        match self {
            Language::English => &ENGLISH,
            Language::Arabic => &ARABIC,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "ar" => Ok(Language::Arabic),
            other => Err(format!("unsupported language code: {other}")),
        }
    }
}

/// Fixed set of user-facing strings for one language.
#[derive(Debug)]
pub struct LocaleBundle {
    /// Sent after a language is picked.
    pub welcome: &'static str,
    /// Filler messages sent while an image is being generated.
    pub working_phrases: &'static [&'static str],
    /// Sent when no image could be produced.
    pub error_text: &'static str,
    /// Put in front of the user's prompt in the photo caption.
    pub caption_prefix: &'static str,
    /// Toast shown when the language button is pressed.
    pub language_selected: &'static str,
}

/// Prompt shown above the language selection keyboard.
pub const LANGUAGE_PROMPT: &str = "Please choose your language / الرجاء اختيار لغتك";

static ENGLISH: LocaleBundle = LocaleBundle {
    welcome: "Hello! I'm here to make any image you want in mind come true 🚀\n\n\
              Please send me a text description.",
    working_phrases: &[
        "Consulting the artist... 🎨",
        "Mixing magic potions... 🧪",
        "Dreaming up your image... 💭",
        "Summoning the pixels... 🪄",
        "Asking the AI gods... 🤖",
    ],
    error_text: "Sorry, I couldn't generate that image. Please try again.",
    caption_prefix: "✨ Here is your imagination turned into reality :",
    language_selected: "Language set to English",
};

static ARABIC: LocaleBundle = LocaleBundle {
    welcome: "مرحباً! أنا هنا لأحقق أي صورة تخطر في بالك 🚀\n\nالرجاء إرسال وصف للصورة.",
    working_phrases: &[
        "جارٍ استشارة الفنان... 🎨",
        "جارٍ خلط الوصفات السحرية... 🧪",
        "أحلم بصورتك... 💭",
        "أستدعي البيكسلات... 🪄",
        "جارٍ المعالجة الذكية... 🤖",
    ],
    error_text: "عذراً، لم أتمكن من إنشاء الصورة. حاول مرة أخرى.",
    caption_prefix: "✨ ها هو خيالك وقد أصبح حقيقة :",
    language_selected: "تم اختيار اللغة العربية",
};
