
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Reasons a translation could not be obtained.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The HTTP call itself failed or timed out.
    #[error("Translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("Translation endpoint returned HTTP {0}")]
    Status(StatusCode),
    /// The body did not contain any translated text.
    #[error("Unexpected translation response shape")]
    MalformedResponse,
}

type Result<T> = std::result::Result<T, TranslationError>;

/// Translates free text into a target language.
#[automock]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into the language identified by `target_lang`,
    /// auto-detecting the source language.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// Client for the public Google Translate `gtx` endpoint.
pub struct GoogleTranslator {
    client: Client,
    url: String,
}

impl GoogleTranslator {
    /// Creates a client for the endpoint at `url`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.to_string() })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        translation_from_response(status, &body)
    }
}

fn translation_from_response(status: StatusCode, body: &[u8]) -> Result<String> {
    if !status.is_success() {
        return Err(TranslationError::Status(status));
    }

    let body: Value =
        serde_json::from_slice(body).map_err(|_| TranslationError::MalformedResponse)?;
    parse_translation(&body)
}

/// Joins the translated segments of a `gtx` response.
///
/// The body looks like `[[["translated", "original", ...], ...], ...]`.
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or(TranslationError::MalformedResponse)?;

    let translated = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect::<String>();

    if translated.trim().is_empty() {
        return Err(TranslationError::MalformedResponse);
    }

    Ok(translated)
}
