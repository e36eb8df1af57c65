use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::{ChunkStream, ImageStreamService};
use crate::{Error, Result};
use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    image_size: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(300),
                client,
            ),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

fn decode_chunk(data: &str) -> Result<crate::ai::ResponseChunk> {
    let wire: GenerateContentResponse = serde_json::from_str(data).map_err(|e| {
        Error::AiProvider(format!("Failed to parse Gemini stream chunk: {}", e))
    })?;
    wire.into_chunk()
}

#[async_trait]
impl ImageStreamService for GeminiImageClient {
    async fn stream_generate(&self, prompt: &str) -> Result<ChunkStream> {
        let request = ImageRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            // Search grounding stays enabled so prompts referencing real
            // subjects render accurately.
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
                image_config: Some(ImageConfig {
                    image_size: "1K".to_string(),
                }),
            },
        };

        let events = self.http.stream_generate_content(&request).await?;
        let chunks = events.map(|event| event.and_then(|data| decode_chunk(&data)));
        Ok(Box::pin(chunks))
    }
}
