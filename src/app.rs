//! Application orchestration: one request, one pass over the response stream.

use crate::ai::{GeminiImageClient, ImageStreamService};
use crate::materialize::ResponseMaterializer;
use crate::models::Config;
use crate::Result;
use std::path::PathBuf;
use tracing::info;

pub struct App {
    image: Box<dyn ImageStreamService>,
}

impl App {
    /// Construct an app from environment configuration (`Config::from_env`).
    ///
    /// Fails before any network activity when the API key is missing.
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        info!("Image provider: Gemini (model: {})", config.image_model);

        Ok(Self::with_service(Box::new(GeminiImageClient::new(
            config.gemini_api_key,
            config.image_model,
        ))))
    }

    /// Build an app from a concrete service, for tests and harnesses.
    pub fn with_service(image: Box<dyn ImageStreamService>) -> Self {
        Self { image }
    }

    /// Generates images for `prompt` and writes them under `output` (a full
    /// filename or a prefix). Returns the saved paths in stream order.
    pub async fn run(&self, prompt: &str, output: &str) -> Result<Vec<PathBuf>> {
        info!("Generating image for prompt: '{}'", prompt);

        let chunks = self.image.stream_generate(prompt).await?;
        ResponseMaterializer::new(output).consume(chunks).await
    }
}
