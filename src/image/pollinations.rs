use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use url::Url;

use super::{GeneratedImage, ImageError, ImageProvider, Result, ensure_success};

/// Pollinations endpoint. Returns raw image bytes for a prompt.
pub struct PollinationsProvider {
    client: Client,
    base_url: Url,
    width: u32,
    height: u32,
}

impl PollinationsProvider {
    /// Creates a client for the endpoint at `base_url`, requesting images of
    /// `width` x `height` pixels.
    pub fn new(base_url: &str, width: u32, height: u32, timeout: Duration) -> Result<Self> {
        let invalid = |reason: String| ImageError::InvalidEndpoint {
            url: base_url.to_string(),
            reason,
        };

        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot hold a path".to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url, width, height })
    }

    /// Builds the request URL. A fresh seed keeps identical prompts from
    /// producing identical pictures.
    fn request_url(&self, prompt: &str, seed: u32) -> Result<Url> {
        // Dot segments are dropped by URL normalisation.
        if prompt == "." || prompt == ".." {
            return Err(ImageError::UnsupportedPrompt(prompt.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ImageError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: "URL cannot hold a path".to_string(),
            })?
            .pop_if_empty()
            .extend(["prompt", prompt]);

        url.query_pairs_mut()
            .append_pair("width", &self.width.to_string())
            .append_pair("height", &self.height.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("nologo", "true");

        Ok(url)
    }
}

#[async_trait]
impl ImageProvider for PollinationsProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let url = self.request_url(prompt, rand::random())?;
        tracing::debug!("Requesting image bytes from {url}");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| value.to_str().unwrap_or_default().to_string());
        let bytes = resp.bytes().await?;

        image_from_response(status, content_type.as_deref(), &bytes)
    }
}

/// Accepts a response only when it is a success carrying a non-empty image.
/// A missing content type is tolerated.
fn image_from_response(
    status: StatusCode,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<GeneratedImage> {
    ensure_success(status)?;

    if let Some(content_type) = content_type {
        if !content_type.starts_with("image/") {
            return Err(ImageError::MalformedResponse(format!(
                "unexpected content type {content_type}"
            )));
        }
    }

    if bytes.is_empty() {
        return Err(ImageError::MalformedResponse("empty image body".to_string()));
    }

    Ok(GeneratedImage::Bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0];

    fn provider(base_url: &str) -> PollinationsProvider {
        PollinationsProvider::new(base_url, 512, 768, Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_request_url_encodes_prompt_and_parameters() {
        let url = provider("https://image.pollinations.ai")
            .request_url("a red fox/in snow", 42)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://image.pollinations.ai/prompt/a%20red%20fox%2Fin%20snow?width=512&height=768&seed=42&nologo=true"
        );
    }

    #[test]
    fn test_request_url_with_trailing_slash_base() {
        let url = provider("https://image.pollinations.ai/").request_url("cat", 1).unwrap();

        assert_eq!(
            url.as_str(),
            "https://image.pollinations.ai/prompt/cat?width=512&height=768&seed=1&nologo=true"
        );
    }

    #[test]
    fn test_request_url_seed_changes_url() {
        let provider = provider("https://image.pollinations.ai");

        let first = provider.request_url("cat", 1).unwrap();
        let second = provider.request_url("cat", 2).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_request_url_rejects_dot_segments() {
        let provider = provider("https://image.pollinations.ai");

        for prompt in [".", ".."] {
            assert!(matches!(
                provider.request_url(prompt, 1),
                Err(ImageError::UnsupportedPrompt(p)) if p == prompt
            ));
        }
    }

    #[test]
    fn test_request_url_keeps_dots_inside_prompt() {
        let url = provider("https://image.pollinations.ai").request_url("...", 1).unwrap();

        assert_eq!(
            url.as_str(),
            "https://image.pollinations.ai/prompt/...?width=512&height=768&seed=1&nologo=true"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = PollinationsProvider::new("not a url", 512, 768, Duration::from_secs(30));

        assert!(matches!(result, Err(ImageError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_new_rejects_base_url_without_path() {
        let result = PollinationsProvider::new(
            "mailto:someone@example.com",
            512,
            768,
            Duration::from_secs(30),
        );

        assert!(matches!(result, Err(ImageError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_image_from_response_accepts_image() {
        let image = image_from_response(StatusCode::OK, Some("image/jpeg"), JPEG).unwrap();

        assert_eq!(image, GeneratedImage::Bytes(JPEG.to_vec()));
    }

    #[test]
    fn test_image_from_response_without_content_type() {
        let image = image_from_response(StatusCode::OK, None, JPEG).unwrap();

        assert_eq!(image, GeneratedImage::Bytes(JPEG.to_vec()));
    }

    #[test]
    fn test_image_from_response_rejects_error_status() {
        let result = image_from_response(StatusCode::BAD_GATEWAY, Some("image/jpeg"), JPEG);

        assert!(matches!(result, Err(ImageError::Status(StatusCode::BAD_GATEWAY))));
    }

    #[test]
    fn test_image_from_response_rejects_non_image_content_type() {
        let result =
            image_from_response(StatusCode::OK, Some("text/html; charset=utf-8"), b"<html></html>");

        assert!(matches!(result, Err(ImageError::MalformedResponse(_))));
    }

    #[test]
    fn test_image_from_response_rejects_unreadable_content_type() {
        let result = image_from_response(StatusCode::OK, Some(""), JPEG);

        assert!(matches!(result, Err(ImageError::MalformedResponse(_))));
    }

    #[test]
    fn test_image_from_response_rejects_empty_body() {
        let result = image_from_response(StatusCode::OK, Some("image/jpeg"), &[]);

        assert!(matches!(result, Err(ImageError::MalformedResponse(_))));
    }
}
