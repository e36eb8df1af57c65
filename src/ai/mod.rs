//! AI service integration for streaming image generation
//!
//! Defines the decoded chunk/candidate/part shape handed to the materializer
//! and the service trait implemented by the Gemini client and the test mock.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiImageClient;
pub use mock::MockImageStreamClient;

use crate::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// One increment of a streamed generation response, already decoded from the
/// wire format (base64 payloads expanded to raw bytes).
#[derive(Debug, Clone)]
pub struct ResponseChunk {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone)]
pub struct CandidateContent {
    pub parts: Vec<ResponsePart>,
}

/// Smallest addressable unit of response content.
#[derive(Debug, Clone)]
pub enum ResponsePart {
    Image { mime_type: String, data: Vec<u8> },
    Text(String),
}

/// Finite, non-restartable sequence of response chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ResponseChunk>> + Send>>;

#[async_trait]
pub trait ImageStreamService: Send + Sync {
    /// Issues a single generation request and returns the resulting chunk
    /// stream. Stream items surface mid-stream transport or decode failures.
    async fn stream_generate(&self, prompt: &str) -> Result<ChunkStream>;
}
