use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{GeneratedImage, ImageError, ImageProvider, Result, ensure_success};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 12; SM-A025F Build/SP1A.210812.016) \
                                  AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.7151.61 \
                                  Mobile Safari/537.36";
const ASPECT_RATIO: &str = "1:1";

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    project_id: &'a str,
    prompt: &'a str,
    aspect_ratio: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    url: Option<String>,
}

/// Websim inference endpoint. Returns a hosted image URL.
pub struct WebsimProvider {
    client: Client,
    api_url: String,
    project_id: String,
}

impl WebsimProvider {
    /// Creates a client posting to `api_url` on behalf of `project_id`.
    pub fn new(api_url: &str, project_id: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ORIGIN, HeaderValue::from_static("https://websim.com"));
        headers.insert(REFERER, HeaderValue::from_static("https://websim.com/"));

        let client = Client::builder().default_headers(headers).timeout(timeout).build()?;
        tracing::debug!("Websim HTTP client built successfully.");

        Ok(Self { client, api_url: api_url.to_string(), project_id: project_id.to_string() })
    }
}

#[async_trait]
impl ImageProvider for WebsimProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = GenerationRequest {
            project_id: &self.project_id,
            prompt,
            aspect_ratio: ASPECT_RATIO,
        };

        let resp = self.client.post(&self.api_url).json(&request).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        image_from_response(status, &body)
    }
}

fn image_from_response(status: StatusCode, body: &[u8]) -> Result<GeneratedImage> {
    ensure_success(status)?;

    let body: GenerationResponse = serde_json::from_slice(body)
        .map_err(|e| ImageError::MalformedResponse(format!("invalid response body: {e}")))?;
    let url = body
        .url
        .ok_or_else(|| ImageError::MalformedResponse("response has no url".to_string()))?;

    Url::parse(&url)
        .map(GeneratedImage::Url)
        .map_err(|e| ImageError::MalformedResponse(format!("invalid image url '{url}': {e}")))
}
