mod pollinations;
mod websim;

use async_trait::async_trait;
use mockall::automock;
pub use pollinations::PollinationsProvider;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;
pub use websim::WebsimProvider;

/// Reasons an image could not be produced.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The HTTP call itself failed or timed out.
    #[error("Image request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("Image endpoint returned HTTP {0}")]
    Status(StatusCode),
    /// The endpoint answered, but not with an image.
    #[error("Image endpoint returned no usable image: {0}")]
    MalformedResponse(String),
    /// The configured endpoint URL cannot be used.
    #[error("Invalid image endpoint URL '{url}': {reason}")]
    InvalidEndpoint {
        /// The configured URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The prompt cannot be placed in a request.
    #[error("Prompt cannot be sent to the image endpoint: {0:?}")]
    UnsupportedPrompt(String),
}

type Result<T> = std::result::Result<T, ImageError>;

/// An image produced for a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedImage {
    /// Hosted by the provider, relayed to Telegram without downloading.
    Url(Url),
    /// Raw encoded image, uploaded to Telegram as a file.
    Bytes(Vec<u8>),
}

/// Produces an image for an (English) prompt.
#[automock]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates one image for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;
}

fn ensure_success(status: StatusCode) -> Result<()> {
    if status.is_success() { Ok(()) } else { Err(ImageError::Status(status)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_success() {
        assert!(ensure_success(StatusCode::OK).is_ok());
        assert!(matches!(
            ensure_success(StatusCode::TOO_MANY_REQUESTS),
            Err(ImageError::Status(StatusCode::TOO_MANY_REQUESTS))
        ));
        assert!(matches!(
            ensure_success(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ImageError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        ));
    }
}
