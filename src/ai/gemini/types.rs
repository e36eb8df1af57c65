//! Serde models for the Gemini `generateContent` wire format.

use crate::ai::{Candidate, CandidateContent, ResponseChunk, ResponsePart};
use crate::{Error, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of the part shapes this tool consumes.
///
/// Variant order matters for `#[serde(untagged)]` decoding; `Other` is the
/// catch-all for part kinds we do not handle (thoughts, function calls, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

/// Base64 inline payload carrying image data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One streamed `generateContent` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<WireCandidate>,
}

/// Candidate item returned by Gemini. `content` is absent on chunks that only
/// carry metadata (finish reason, safety ratings).
#[derive(Debug, Clone, Deserialize)]
pub struct WireCandidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Expands base64 payloads and drops part kinds we do not handle,
    /// producing the decoded chunk shape the materializer consumes.
    pub fn into_chunk(self) -> Result<ResponseChunk> {
        let mut candidates = Vec::with_capacity(self.candidates.len());
        for wire in self.candidates {
            let content = match wire.content {
                Some(content) => {
                    let mut parts = Vec::with_capacity(content.parts.len());
                    for part in content.parts {
                        match part {
                            Part::Text { text } => parts.push(ResponsePart::Text(text)),
                            Part::InlineData { inline_data } => {
                                let data = base64::engine::general_purpose::STANDARD
                                    .decode(&inline_data.data)
                                    .map_err(|e| {
                                        Error::AiProvider(format!(
                                            "Failed to decode base64 image payload: {}",
                                            e
                                        ))
                                    })?;
                                parts.push(ResponsePart::Image {
                                    mime_type: inline_data.mime_type,
                                    data,
                                });
                            }
                            Part::Other(_) => {}
                        }
                    }
                    Some(CandidateContent { parts })
                }
                None => None,
            };
            candidates.push(Candidate { content });
        }
        Ok(ResponseChunk { candidates })
    }
}
