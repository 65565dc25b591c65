use std::{env, time::Duration};

use thiserror::Error;

const PLACEHOLDER_BOT_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";
const DEFAULT_WEBSIM_API_URL: &str = "https://api.websim.com/api/v1/inference/run_image_generation";
const DEFAULT_POLLINATIONS_URL: &str = "https://image.pollinations.ai";
const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
const DEFAULT_IMAGE_WIDTH: u32 = 1024;
const DEFAULT_IMAGE_HEIGHT: u32 = 1024;
const DEFAULT_IMAGE_TIMEOUT: u64 = 30;
const DEFAULT_TRANSLATE_TIMEOUT: u64 = 15;
const DEFAULT_POLL_TIMEOUT: u32 = 100;
const DEFAULT_IDLE_PAUSE: u64 = 1;
const DEFAULT_ERROR_PAUSE: u64 = 5;

/// Errors that prevent the bot from starting.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// `BOT_TOKEN` is unset or empty.
    #[error("BOT_TOKEN environment variable is required")]
    MissingBotToken,
    /// `BOT_TOKEN` was left at the sample value.
    #[error("BOT_TOKEN still holds the placeholder value, please set your bot token")]
    PlaceholderBotToken,
    /// The websim provider is selected without a project.
    #[error("WEBSIM_PROJECT_ID environment variable is required for the websim image provider")]
    MissingProjectId,
    /// `IMAGE_PROVIDER` names no known provider.
    #[error("Unknown IMAGE_PROVIDER '{0}', expected 'websim' or 'pollinations'")]
    UnknownProvider(String),
}

/// Which image generation service to talk to.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageProviderKind {
    /// Hosted-URL endpoint, needs a project identifier.
    Websim {
        /// Project the generation requests are billed to.
        project_id: String,
    },
    /// Stateless endpoint returning raw image bytes.
    Pollinations,
}

/// Represents the application configuration.
#[derive(Debug)]
pub struct Config {
    /// The Telegram bot token.
    pub telegram_bot_token: String,
    /// The selected image provider.
    pub image_provider: ImageProviderKind,
    /// The URL of the Websim image generation endpoint.
    pub websim_api_url: String,
    /// The base URL of the Pollinations image endpoint.
    pub pollinations_url: String,
    /// The URL of the translation endpoint.
    pub translate_url: String,
    /// Width in pixels requested from byte-returning providers.
    pub image_width: u32,
    /// Height in pixels requested from byte-returning providers.
    pub image_height: u32,
    /// Upper bound on a single image generation call.
    pub image_timeout: Duration,
    /// Upper bound on a single translation call.
    pub translate_timeout: Duration,
    /// Long-poll timeout in seconds passed to Telegram.
    pub poll_timeout: u32,
    /// Pause after every poll cycle.
    pub idle_pause: Duration,
    /// Pause after a batch failed.
    pub error_pause: Duration,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let telegram_bot_token = match env::var("BOT_TOKEN") {
            Ok(token) if token.trim().is_empty() => return Err(ConfigError::MissingBotToken),
            Ok(token) if token == PLACEHOLDER_BOT_TOKEN => {
                return Err(ConfigError::PlaceholderBotToken);
            }
            Ok(token) => token,
            Err(_) => return Err(ConfigError::MissingBotToken),
        };

        let image_provider = match env::var("IMAGE_PROVIDER")
            .unwrap_or_else(|_| "websim".to_string())
            .to_lowercase()
            .as_str()
        {
            "websim" => {
                let project_id = env::var("WEBSIM_PROJECT_ID")
                    .ok()
                    .filter(|id| !id.trim().is_empty())
                    .ok_or(ConfigError::MissingProjectId)?;
                ImageProviderKind::Websim { project_id }
            }
            "pollinations" => ImageProviderKind::Pollinations,
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        Ok(Self {
            telegram_bot_token,
            image_provider,
            websim_api_url: env::var("WEBSIM_API_URL")
                .unwrap_or_else(|_| DEFAULT_WEBSIM_API_URL.to_string()),
            pollinations_url: env::var("POLLINATIONS_URL")
                .unwrap_or_else(|_| DEFAULT_POLLINATIONS_URL.to_string()),
            translate_url: env::var("TRANSLATE_URL")
                .unwrap_or_else(|_| DEFAULT_TRANSLATE_URL.to_string()),
            image_width: parse_or("IMAGE_WIDTH", DEFAULT_IMAGE_WIDTH),
            image_height: parse_or("IMAGE_HEIGHT", DEFAULT_IMAGE_HEIGHT),
            image_timeout: Duration::from_secs(parse_or("IMAGE_TIMEOUT", DEFAULT_IMAGE_TIMEOUT)),
            translate_timeout: Duration::from_secs(parse_or(
                "TRANSLATE_TIMEOUT",
                DEFAULT_TRANSLATE_TIMEOUT,
            )),
            poll_timeout: parse_or("POLL_TIMEOUT", DEFAULT_POLL_TIMEOUT),
            idle_pause: Duration::from_secs(parse_or("IDLE_PAUSE", DEFAULT_IDLE_PAUSE)),
            error_pause: Duration::from_secs(parse_or("ERROR_PAUSE", DEFAULT_ERROR_PAUSE)),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
