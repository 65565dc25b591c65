use std::sync::Arc;

use crate::{
    image::{GeneratedImage, ImageProvider},
    translation::Translator,
};

/// Language image models are prompted in.
const PROMPT_LANGUAGE: &str = "en";

/// Turns a user prompt into an image: translate first, then generate.
pub struct ImagePipeline {
    translator: Arc<dyn Translator>,
    image_provider: Arc<dyn ImageProvider>,
}

impl ImagePipeline {
    /// Creates a pipeline from its two collaborators.
    pub fn new(translator: Arc<dyn Translator>, image_provider: Arc<dyn ImageProvider>) -> Self {
        Self { translator, image_provider }
    }

    /// Translates `prompt`, keeping the original text if translation fails.
    pub async fn translate_prompt(&self, prompt: &str) -> String {
        match self.translator.translate(prompt, PROMPT_LANGUAGE).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("Translation failed, using the original prompt: {e}");
                prompt.to_string()
            }
        }
    }

    /// Produces an image for `prompt`. Provider failures are logged and
    /// reported as `None`.
    pub async fn generate(&self, prompt: &str) -> Option<GeneratedImage> {
        let translated = self.translate_prompt(prompt).await;
        tracing::info!("Generating image for: {translated}");

        match self.image_provider.generate(&translated).await {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Image generation failed: {e}");
                None
            }
        }
    }
}
